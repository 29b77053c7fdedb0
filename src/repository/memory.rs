//! In-memory repository used by tests and `STUDENT_STORE=memory`.

use super::StudentRepository;
use crate::error::AppError;
use crate::model::{Student, YearCount};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Rows {
    by_id: BTreeMap<i32, Student>,
    /// Last id handed out; ids are never reused, like a database sequence.
    last_id: i32,
}

#[derive(Default)]
pub struct InMemoryStudentRepository {
    rows: RwLock<Rows>,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn filter<F>(&self, pred: F) -> Vec<Student>
    where
        F: Fn(&Student) -> bool,
    {
        let rows = self.rows.read().await;
        rows.by_id.values().filter(|s| pred(*s)).cloned().collect()
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn save(&self, mut student: Student) -> Result<Student, AppError> {
        let mut rows = self.rows.write().await;
        let id = match student.id {
            Some(id) if rows.by_id.contains_key(&id) => id,
            _ => {
                rows.last_id = rows
                    .last_id
                    .checked_add(1)
                    .ok_or_else(|| AppError::Internal("student id sequence exhausted".into()))?;
                rows.last_id
            }
        };
        student.id = Some(id);
        rows.by_id.insert(id, student.clone());
        Ok(student)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Student>, AppError> {
        Ok(self.rows.read().await.by_id.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Student>, AppError> {
        Ok(self.filter(|_| true).await)
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        Ok(self.rows.write().await.by_id.remove(&id).is_some())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.rows.read().await.by_id.len() as i64)
    }

    async fn count_by_birth_year(&self) -> Result<Vec<YearCount>, AppError> {
        let rows = self.rows.read().await;
        let mut groups: BTreeMap<Option<i32>, i64> = BTreeMap::new();
        for s in rows.by_id.values() {
            *groups.entry(s.date_naissance.map(|d| d.year())).or_default() += 1;
        }
        Ok(groups.into_iter().map(|(year, n)| YearCount(year, n)).collect())
    }

    async fn find_by_nom(&self, nom: &str) -> Result<Vec<Student>, AppError> {
        Ok(self.filter(|s| s.nom.as_deref() == Some(nom)).await)
    }

    async fn find_by_prenom(&self, prenom: &str) -> Result<Vec<Student>, AppError> {
        Ok(self.filter(|s| s.prenom.as_deref() == Some(prenom)).await)
    }

    async fn find_by_nom_and_prenom(&self, nom: &str, prenom: &str) -> Result<Vec<Student>, AppError> {
        Ok(self
            .filter(|s| s.nom.as_deref() == Some(nom) && s.prenom.as_deref() == Some(prenom))
            .await)
    }

    async fn find_born_after(&self, date: NaiveDate) -> Result<Vec<Student>, AppError> {
        Ok(self.filter(|s| s.date_naissance.is_some_and(|d| d > date)).await)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = InMemoryStudentRepository::new();
        let a = repo.save(Student::new("A", "a", None)).await.unwrap();
        assert!(repo.delete(a.id.unwrap()).await.unwrap());
        let b = repo.save(Student::new("B", "b", None)).await.unwrap();
        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));
    }

    #[tokio::test]
    async fn save_with_unknown_id_inserts_fresh_row() {
        let repo = InMemoryStudentRepository::new();
        let s = Student {
            id: Some(50),
            ..Student::new("A", "a", None)
        };
        let saved = repo.save(s).await.unwrap();
        assert_eq!(saved.id, Some(1));
        assert!(repo.find_by_id(50).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_with_known_id_overwrites() {
        let repo = InMemoryStudentRepository::new();
        let mut s = repo.save(Student::new("A", "a", None)).await.unwrap();
        s.prenom = Some("changed".into());
        repo.save(s.clone()).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(repo.find_by_id(1).await.unwrap(), Some(s));
    }

    #[tokio::test]
    async fn name_match_is_case_sensitive() {
        let repo = InMemoryStudentRepository::new();
        repo.save(Student::new("LACHGAR", "Mohamed", None)).await.unwrap();
        repo.save(Student::new("Lachgar", "Mohamed", None)).await.unwrap();
        let found = repo.find_by_nom("LACHGAR").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].nom.as_deref(), Some("LACHGAR"));
    }

    #[tokio::test]
    async fn groups_by_year_including_missing_dates() {
        let repo = InMemoryStudentRepository::new();
        repo.save(Student::new("A", "a", date(1985, 3, 1))).await.unwrap();
        repo.save(Student::new("B", "b", date(1985, 9, 9))).await.unwrap();
        repo.save(Student::new("C", "c", date(1990, 1, 1))).await.unwrap();
        repo.save(Student::new("D", "d", None)).await.unwrap();
        let groups = repo.count_by_birth_year().await.unwrap();
        assert_eq!(
            groups,
            vec![YearCount(None, 1), YearCount(Some(1985), 2), YearCount(Some(1990), 1)]
        );
    }

    #[tokio::test]
    async fn born_after_is_strict() {
        let repo = InMemoryStudentRepository::new();
        repo.save(Student::new("A", "a", date(2000, 1, 1))).await.unwrap();
        repo.save(Student::new("B", "b", date(2000, 1, 2))).await.unwrap();
        repo.save(Student::new("C", "c", None)).await.unwrap();
        let found = repo.find_born_after(date(2000, 1, 1).unwrap()).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].nom.as_deref(), Some("B"));
    }
}
