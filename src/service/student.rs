//! Student operations on top of a [`StudentRepository`].

use crate::error::AppError;
use crate::model::{Student, YearCount};
use crate::repository::StudentRepository;
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Clone)]
pub struct StudentService {
    repo: Arc<dyn StudentRepository>,
}

impl StudentService {
    pub fn new(repo: Arc<dyn StudentRepository>) -> Self {
        Self { repo }
    }

    /// Insert or overwrite. Any store failure is reported as `BadRequest`.
    pub async fn save(&self, student: Student) -> Result<Student, AppError> {
        self.repo.save(student).await.map_err(|e| {
            tracing::debug!(error = %e, "save failed");
            AppError::BadRequest(e.to_string())
        })
    }

    /// Overwrite nom, prenom and date of birth of an existing row. `None` when `id` is absent.
    pub async fn update(&self, id: i32, student: Student) -> Result<Option<Student>, AppError> {
        let Some(mut existing) = self.repo.find_by_id(id).await? else {
            return Ok(None);
        };
        existing.overwrite_fields(student);
        self.repo.save(existing).await.map(Some)
    }

    /// `false` when `id` is absent.
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Ok(false);
        }
        self.repo.delete(id).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Student>, AppError> {
        self.repo.find_by_id(id).await
    }

    pub async fn find_all(&self) -> Result<Vec<Student>, AppError> {
        self.repo.find_all().await
    }

    pub async fn count_students(&self) -> Result<i64, AppError> {
        self.repo.count().await
    }

    pub async fn find_nbr_student_by_year(&self) -> Result<Vec<YearCount>, AppError> {
        self.repo.count_by_birth_year().await
    }

    pub async fn find_by_nom(&self, nom: &str) -> Result<Vec<Student>, AppError> {
        self.repo.find_by_nom(nom).await
    }

    pub async fn find_by_prenom(&self, prenom: &str) -> Result<Vec<Student>, AppError> {
        self.repo.find_by_prenom(prenom).await
    }

    pub async fn find_by_nom_and_prenom(&self, nom: &str, prenom: &str) -> Result<Vec<Student>, AppError> {
        self.repo.find_by_nom_and_prenom(nom, prenom).await
    }

    pub async fn find_born_after(&self, date: NaiveDate) -> Result<Vec<Student>, AppError> {
        self.repo.find_born_after(date).await
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.repo.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryStudentRepository;
    use async_trait::async_trait;

    fn service() -> StudentService {
        StudentService::new(Arc::new(InMemoryStudentRepository::new()))
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    // Store whose writes always fail.
    struct FailingRepository;

    #[async_trait]
    impl StudentRepository for FailingRepository {
        async fn save(&self, _student: Student) -> Result<Student, AppError> {
            Err(AppError::Db(sqlx::Error::PoolTimedOut))
        }
        async fn find_by_id(&self, _id: i32) -> Result<Option<Student>, AppError> {
            Ok(None)
        }
        async fn find_all(&self) -> Result<Vec<Student>, AppError> {
            Ok(Vec::new())
        }
        async fn delete(&self, _id: i32) -> Result<bool, AppError> {
            Ok(false)
        }
        async fn count(&self) -> Result<i64, AppError> {
            Ok(0)
        }
        async fn count_by_birth_year(&self) -> Result<Vec<YearCount>, AppError> {
            Ok(Vec::new())
        }
        async fn find_by_nom(&self, _nom: &str) -> Result<Vec<Student>, AppError> {
            Ok(Vec::new())
        }
        async fn find_by_prenom(&self, _prenom: &str) -> Result<Vec<Student>, AppError> {
            Ok(Vec::new())
        }
        async fn find_by_nom_and_prenom(&self, _nom: &str, _prenom: &str) -> Result<Vec<Student>, AppError> {
            Ok(Vec::new())
        }
        async fn find_born_after(&self, _date: NaiveDate) -> Result<Vec<Student>, AppError> {
            Ok(Vec::new())
        }
        async fn ping(&self) -> Result<(), AppError> {
            Err(AppError::Internal("down".into()))
        }
    }

    #[tokio::test]
    async fn save_assigns_fresh_ids() {
        let svc = service();
        let a = svc.save(Student::new("LACHGAR", "Mohamed", date(1990, 1, 1))).await.unwrap();
        let b = svc.save(Student::new("MARTIN", "Sophie", None)).await.unwrap();
        assert!(a.id.is_some());
        assert!(b.id.is_some());
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn save_failure_becomes_bad_request() {
        let svc = StudentService::new(Arc::new(FailingRepository));
        let err = svc.save(Student::new("A", "a", None)).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let svc = service();
        assert!(svc.find_by_id(999).await.unwrap().is_none());
        assert!(svc.update(999, Student::new("X", "y", None)).await.unwrap().is_none());
        assert!(!svc.delete(999).await.unwrap());
        assert_eq!(svc.count_students().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_keeps_id() {
        let svc = service();
        let saved = svc.save(Student::new("LACHGAR", "Mohamed", date(1990, 1, 1))).await.unwrap();
        let id = saved.id.unwrap();
        let incoming = Student {
            id: Some(id + 100),
            ..Student::new("LACHGAR", "Mohamed Ali", date(1991, 2, 3))
        };
        let updated = svc.update(id, incoming).await.unwrap().unwrap();
        assert_eq!(updated.id, Some(id));

        let found = svc.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.prenom.as_deref(), Some("Mohamed Ali"));
        assert_eq!(found.date_naissance, date(1991, 2, 3));
        assert_eq!(svc.count_students().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_removes_exactly_one() {
        let svc = service();
        let a = svc.save(Student::new("A", "a", None)).await.unwrap();
        svc.save(Student::new("B", "b", None)).await.unwrap();
        let before = svc.count_students().await.unwrap();
        assert!(svc.delete(a.id.unwrap()).await.unwrap());
        assert!(svc.find_by_id(a.id.unwrap()).await.unwrap().is_none());
        assert_eq!(svc.count_students().await.unwrap(), before - 1);
    }

    #[tokio::test]
    async fn year_counts_sum_to_total() {
        let svc = service();
        for (nom, d) in [("A", date(1985, 1, 1)), ("B", date(1985, 6, 1)), ("C", date(1990, 1, 1)), ("D", None)] {
            svc.save(Student::new(nom, "x", d)).await.unwrap();
        }
        let sum: i64 = svc
            .find_nbr_student_by_year()
            .await
            .unwrap()
            .iter()
            .map(YearCount::count)
            .sum();
        assert_eq!(sum, svc.count_students().await.unwrap());
    }

    #[tokio::test]
    async fn searches_match_exactly() {
        let svc = service();
        svc.save(Student::new("LACHGAR", "Mohamed", None)).await.unwrap();
        svc.save(Student::new("LACHGAR", "Ali", None)).await.unwrap();
        svc.save(Student::new("MARTIN", "Mohamed", None)).await.unwrap();

        assert_eq!(svc.find_by_nom("LACHGAR").await.unwrap().len(), 2);
        assert_eq!(svc.find_by_nom("lachgar").await.unwrap().len(), 0);
        assert_eq!(svc.find_by_prenom("Mohamed").await.unwrap().len(), 2);
        let both = svc.find_by_nom_and_prenom("LACHGAR", "Ali").await.unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].prenom.as_deref(), Some("Ali"));
    }
}
