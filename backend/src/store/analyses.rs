use super::{now_rfc3339, Store, StoreError};
use common::model::record::{AnalysisRecord, AnalysisRecordInput};
use rusqlite::params;

pub const HISTORY_LIMIT: usize = 20;

impl Store {
    /// Stores one record as a JSON document and returns its id.
    pub fn insert_analysis(
        &self,
        user_id: &str,
        input: &AnalysisRecordInput,
    ) -> Result<String, StoreError> {
        let id = uuid::Uuid::new_v4().to_string();
        let document = serde_json::to_string(input)?;
        self.conn()?.execute(
            "INSERT INTO analyses (id, user_id, analysis_type, document, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, user_id, input.analysis_type.as_str(), document, now_rfc3339()],
        )?;
        Ok(id)
    }

    /// Most recent records of one user, newest first.
    pub fn list_analyses(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<AnalysisRecord>, StoreError> {
        let rows: Vec<(String, String, String)> = {
            let conn = self.conn()?;
            let mut stmt = conn.prepare(
                "SELECT id, document, created_at FROM analyses
                 WHERE user_id = ?1
                 ORDER BY created_at DESC, rowid DESC
                 LIMIT ?2",
            )?;
            let mapped = stmt.query_map(params![user_id, limit as i64], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })?;
            mapped.collect::<Result<_, _>>()?
        };

        rows.into_iter()
            .map(|(id, document, created_at)| {
                Ok(AnalysisRecord {
                    id,
                    user_id: user_id.to_string(),
                    input: serde_json::from_str(&document)?,
                    created_at,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NewUser;
    use common::model::record::AnalysisType;
    use common::model::user::Provider;

    fn manual_record(function: &str) -> AnalysisRecordInput {
        AnalysisRecordInput {
            filename: None,
            data_points: 5,
            analysis_type: AnalysisType::Manual,
            functions: vec![function.to_string()],
            accuracy: Some("95%".to_string()),
            accuracies: None,
            x_columns: None,
            y_columns: None,
            poly_degree: 1,
            file_size: None,
        }
    }

    #[test]
    fn history_is_per_user_and_newest_first() {
        let store = Store::open_in_memory().unwrap();
        let mut ids = Vec::new();
        for email in ["a@example.com", "b@example.com"] {
            let user = store
                .create_user(NewUser {
                    name: "U",
                    email,
                    password_hash: None,
                    provider: Provider::Credentials,
                    image: None,
                })
                .unwrap();
            ids.push(user.id);
        }

        store.insert_analysis(&ids[0], &manual_record("y = x")).unwrap();
        let latest = store.insert_analysis(&ids[0], &manual_record("y = 2x")).unwrap();
        store.insert_analysis(&ids[1], &manual_record("y = 3x")).unwrap();

        let history = store.list_analyses(&ids[0], HISTORY_LIMIT).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, latest);
        assert_eq!(history[0].input.functions, vec!["y = 2x"]);
        assert_eq!(history[0].user_id, ids[0]);

        assert_eq!(store.list_analyses(&ids[0], 1).unwrap().len(), 1);
    }
}
