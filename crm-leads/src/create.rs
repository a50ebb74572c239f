//! 创建线索（lead.create → lead.created）
//!
use crate::lead::Lead;
use crate::repository::LeadRepository;
use async_trait::async_trait;
use crm_application::command::Command;
use crm_application::command_handler::CommandHandler;
use crm_application::context::AppContext;
use crm_application::error::AppError;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLeadCommand {
    pub project_id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub segment_id: Option<u64>,
}

impl Command for CreateLeadCommand {
    const NAME: &'static str = "lead.create";
    type Output = Lead;
}

pub struct CreateLeadHandler<R> {
    leads: R,
    // 内存实现没有自增主键，序列由 Handler 持有
    sequence: AtomicU64,
}

impl<R: LeadRepository> CreateLeadHandler<R> {
    pub fn new(leads: R, next_id: u64) -> Self {
        Self {
            leads,
            sequence: AtomicU64::new(next_id),
        }
    }

    fn shape_errors(cmd: &CreateLeadCommand) -> Option<String> {
        if cmd.project_id == 0 {
            return Some("Projeto é obrigatório".into());
        }
        if cmd.name.trim().is_empty() {
            return Some("Nome do lead é obrigatório".into());
        }
        if cmd.name.trim().len() < 3 {
            return Some("Nome do lead deve ter pelo menos 3 caracteres".into());
        }
        if !cmd.email.contains('@') {
            return Some("E-mail inválido".into());
        }
        None
    }
}

#[async_trait]
impl<R: LeadRepository> CommandHandler<CreateLeadCommand> for CreateLeadHandler<R> {
    async fn handle(&self, _ctx: &AppContext, cmd: CreateLeadCommand) -> Result<Lead, AppError> {
        if let Some(reason) = Self::shape_errors(&cmd) {
            return Err(AppError::Validation(reason));
        }

        let id = self.sequence.fetch_add(1, Ordering::SeqCst);
        let mut lead = Lead::new(id, cmd.project_id, cmd.name.trim(), cmd.email, cmd.phone);
        lead.segment_id = cmd.segment_id;

        self.leads.save(&lead).await?;

        info!(lead_id = lead.id, project_id = lead.project_id, "lead created");

        Ok(lead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::LeadStatus;
    use crate::repository::InMemoryLeadRepository;
    use crm_domain::persist::Repository;
    use std::sync::Arc;

    fn command() -> CreateLeadCommand {
        CreateLeadCommand {
            project_id: 3,
            name: "Ana Souza".into(),
            email: "ana@example.com".into(),
            phone: "+55 11 90000-0000".into(),
            segment_id: Some(9),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn created_leads_start_at_the_top_of_the_funnel() {
        let repo = Arc::new(InMemoryLeadRepository::new());
        let handler = CreateLeadHandler::new(repo.clone(), 100);

        let lead = handler.handle(&AppContext::default(), command()).await.unwrap();

        assert_eq!(lead.id, 100);
        assert_eq!(lead.status, LeadStatus::New);
        assert_eq!(lead.segment_id, Some(9));
        assert!(repo.find(&100).await.unwrap().is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn ids_are_sequential() {
        let handler = CreateLeadHandler::new(Arc::new(InMemoryLeadRepository::new()), 1);
        let first = handler.handle(&AppContext::default(), command()).await.unwrap();
        let second = handler.handle(&AppContext::default(), command()).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn malformed_commands_are_rejected_before_touching_the_store() {
        let repo = Arc::new(InMemoryLeadRepository::new());
        let handler = CreateLeadHandler::new(repo.clone(), 1);

        let cases = [
            CreateLeadCommand { project_id: 0, ..command() },
            CreateLeadCommand { name: "  ".into(), ..command() },
            CreateLeadCommand { name: "Ab".into(), ..command() },
            CreateLeadCommand { email: "sem-arroba".into(), ..command() },
        ];
        for cmd in cases {
            let err = handler.handle(&AppContext::default(), cmd).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
        let page = repo
            .paginate(&Default::default(), &Default::default())
            .await
            .unwrap();
        assert_eq!(page.total, 0);
    }
}
