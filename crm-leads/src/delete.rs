//! 删除线索（lead.delete → lead.deleted）
//!
//! 有关联活动的线索需要显式 `force` 标记；否则返回带补救指引的
//! 冲突错误，调用方原样展示。
//!
use crate::repository::LeadRepository;
use async_trait::async_trait;
use crm_application::command::Command;
use crm_application::command_handler::CommandHandler;
use crm_application::context::AppContext;
use crm_application::dto::Dto;
use crm_application::error::AppError;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteLeadCommand {
    pub lead_id: u64,
    #[serde(default)]
    pub force: bool,
}

impl Command for DeleteLeadCommand {
    const NAME: &'static str = "lead.delete";
    type Output = LeadRemovalDto;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRemovalDto {
    pub id: u64,
    pub forced: bool,
}

impl Dto for LeadRemovalDto {}

pub struct DeleteLeadHandler<R> {
    leads: R,
}

impl<R: LeadRepository> DeleteLeadHandler<R> {
    pub fn new(leads: R) -> Self {
        Self { leads }
    }
}

#[async_trait]
impl<R: LeadRepository> CommandHandler<DeleteLeadCommand> for DeleteLeadHandler<R> {
    async fn handle(
        &self,
        _ctx: &AppContext,
        cmd: DeleteLeadCommand,
    ) -> Result<LeadRemovalDto, AppError> {
        if cmd.lead_id == 0 {
            return Err(AppError::Validation("Lead é obrigatório".into()));
        }

        let lead = self
            .leads
            .find(&cmd.lead_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Lead não encontrado".into()))?;

        if lead.activity_count > 0 && !cmd.force {
            return Err(AppError::Conflict(format!(
                "Lead possui {} atividades registradas; repita a operação com force=true para remover",
                lead.activity_count
            )));
        }

        self.leads.delete(&cmd.lead_id).await?;

        info!(lead_id = cmd.lead_id, forced = cmd.force, "lead deleted");

        Ok(LeadRemovalDto {
            id: cmd.lead_id,
            forced: cmd.force,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::Lead;
    use crate::repository::InMemoryLeadRepository;
    use crm_domain::persist::Repository;
    use std::sync::Arc;

    fn lead_with_activities(count: u64) -> Lead {
        let mut lead = Lead::new(5, 3, "Ana", "ana@example.com", "+55 11 90000-0000");
        lead.activity_count = count;
        lead
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn delete_with_activities_requires_force() {
        let repo = Arc::new(InMemoryLeadRepository::with_leads([lead_with_activities(4)]));
        let handler = DeleteLeadHandler::new(repo.clone());

        let err = handler
            .handle(
                &AppContext::default(),
                DeleteLeadCommand { lead_id: 5, force: false },
            )
            .await
            .unwrap_err();

        match err {
            AppError::Conflict(reason) => {
                assert!(reason.contains("4 atividades"));
                assert!(reason.contains("force=true"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(repo.find(&5).await.unwrap().is_some(), "lead must survive");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn force_overrides_the_conflict() {
        let repo = Arc::new(InMemoryLeadRepository::with_leads([lead_with_activities(4)]));
        let handler = DeleteLeadHandler::new(repo.clone());

        let dto = handler
            .handle(
                &AppContext::default(),
                DeleteLeadCommand { lead_id: 5, force: true },
            )
            .await
            .unwrap();

        assert_eq!(dto, LeadRemovalDto { id: 5, forced: true });
        assert!(repo.find(&5).await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn clean_leads_delete_without_force() {
        let repo = Arc::new(InMemoryLeadRepository::with_leads([lead_with_activities(0)]));
        let handler = DeleteLeadHandler::new(repo.clone());

        handler
            .handle(
                &AppContext::default(),
                DeleteLeadCommand { lead_id: 5, force: false },
            )
            .await
            .unwrap();

        assert!(repo.find(&5).await.unwrap().is_none());
    }
}
