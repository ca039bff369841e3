use super::rows::{date_key, NoteRow, NOTE_COLUMNS};
use super::{not_found, DateFilter, Db};
use crate::model::{Entity, Note, NoteUpdates};
use crate::Result;
use anyhow::Context;

impl Db {
    pub(crate) async fn insert_note(&self, note: &Note) -> Result<()> {
        sqlx::query("INSERT INTO notes (id, date, title, content) VALUES (?, ?, ?, ?)")
            .bind(note.id.as_str())
            .bind(date_key(note.date))
            .bind(note.title.as_str())
            .bind(note.content.as_str())
            .execute(&self.pool)
            .await
            .context("Failed to insert note")?;
        Ok(())
    }

    pub(crate) async fn get_note(&self, id: &str) -> Result<Option<Note>> {
        let sql = format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?");
        self.fetch_optional::<NoteRow, _>(&sql, id).await
    }

    pub(crate) async fn list_notes(&self, filter: DateFilter) -> Result<Vec<Note>> {
        let (clause, binds) = filter.clause();
        let sql = format!("SELECT {NOTE_COLUMNS} FROM notes {clause} ORDER BY created_at, rowid");
        self.fetch_all::<NoteRow, _>(&sql, binds).await
    }

    pub(crate) async fn update_note(&self, id: &str, updates: &NoteUpdates) -> Result<Note> {
        let result = sqlx::query(
            "UPDATE notes SET \
                date = COALESCE(?, date), \
                title = COALESCE(?, title), \
                content = COALESCE(?, content) \
             WHERE id = ?",
        )
        .bind(updates.date.map(date_key))
        .bind(updates.title.as_deref())
        .bind(updates.content.as_deref())
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update note")?;

        if result.rows_affected() == 0 {
            return Err(not_found(Entity::Note, id));
        }
        self.get_note(id)
            .await?
            .ok_or_else(|| not_found(Entity::Note, id))
    }
}

#[cfg(test)]
mod tests {
    use crate::db::tests::{date, test_db};
    use crate::db::DateFilter;
    use crate::model::{Note, NoteUpdates};
    use crate::utils::generate_id;

    #[tokio::test]
    async fn test_note_crud() {
        let (_dir, db) = test_db().await;
        let note = Note {
            id: generate_id(),
            date: date("2024-05-10"),
            title: "Supplier".to_string(),
            content: "Call about the cable order".to_string(),
        };
        db.insert_note(&note).await.unwrap();
        assert_eq!(
            db.list_notes(DateFilter::On(date("2024-05-10")))
                .await
                .unwrap(),
            vec![note.clone()]
        );
        assert!(db
            .list_notes(DateFilter::On(date("2024-05-11")))
            .await
            .unwrap()
            .is_empty());

        let updated = db
            .update_note(
                &note.id,
                &NoteUpdates {
                    content: Some("Order placed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Supplier");
        assert_eq!(updated.content, "Order placed");
    }
}
