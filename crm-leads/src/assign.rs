//! 指派线索（lead.assign → lead.assigned）
//!
use crate::repository::LeadRepository;
use async_trait::async_trait;
use chrono::Utc;
use crm_application::command::Command;
use crm_application::command_handler::CommandHandler;
use crm_application::context::AppContext;
use crm_application::dto::Dto;
use crm_application::error::AppError;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignLeadCommand {
    pub lead_id: u64,
    pub assigned_to: u64,
}

impl Command for AssignLeadCommand {
    const NAME: &'static str = "lead.assign";
    type Output = LeadAssignmentDto;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadAssignmentDto {
    pub id: u64,
    pub assigned_to: u64,
}

impl Dto for LeadAssignmentDto {}

pub struct AssignLeadHandler<R> {
    leads: R,
}

impl<R: LeadRepository> AssignLeadHandler<R> {
    pub fn new(leads: R) -> Self {
        Self { leads }
    }
}

#[async_trait]
impl<R: LeadRepository> CommandHandler<AssignLeadCommand> for AssignLeadHandler<R> {
    async fn handle(
        &self,
        _ctx: &AppContext,
        cmd: AssignLeadCommand,
    ) -> Result<LeadAssignmentDto, AppError> {
        // 形状校验：跨模块授权在用例层已经发生
        if cmd.lead_id == 0 {
            return Err(AppError::Validation("Lead é obrigatório".into()));
        }
        if cmd.assigned_to == 0 {
            return Err(AppError::Validation(
                "Usuário responsável é obrigatório".into(),
            ));
        }

        let mut lead = self
            .leads
            .find(&cmd.lead_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Lead não encontrado".into()))?;

        lead.assigned_to = Some(cmd.assigned_to);
        lead.updated_at = Utc::now();
        self.leads.save(&lead).await?;

        info!(lead_id = lead.id, assigned_to = cmd.assigned_to, "lead assigned");

        Ok(LeadAssignmentDto {
            id: lead.id,
            assigned_to: cmd.assigned_to,
        })
    }
}
