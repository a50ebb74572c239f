//! 线索模块的跨模块规则
//!
//! 规则只读地查询其他模块（项目目录、线索仓储），绝不改变状态。
//! 命令形状问题（字段缺失、目标不存在）放行给 Handler，避免
//! 两层重复报错。
//!
use crate::repository::LeadRepository;
use async_trait::async_trait;
use crm_application::validation::ValidationRule;
use crm_domain::error::DomainResult;
use dashmap::DashMap;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::Arc;

/// 项目目录（其他域的只读端口）
#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    async fn project_exists(&self, project_id: u64) -> DomainResult<bool>;

    async fn is_member(&self, project_id: u64, user_id: u64) -> DomainResult<bool>;
}

/// 内存项目目录（测试与单进程部署）
#[derive(Default)]
pub struct StaticProjectDirectory {
    members: DashMap<u64, HashSet<u64>>,
}

impl StaticProjectDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_member(&self, project_id: u64, user_id: u64) {
        self.members.entry(project_id).or_default().insert(user_id);
    }
}

#[async_trait]
impl ProjectDirectory for StaticProjectDirectory {
    async fn project_exists(&self, project_id: u64) -> DomainResult<bool> {
        Ok(self.members.contains_key(&project_id))
    }

    async fn is_member(&self, project_id: u64, user_id: u64) -> DomainResult<bool> {
        Ok(self
            .members
            .get(&project_id)
            .is_some_and(|m| m.contains(&user_id)))
    }
}

/// lead.assign 的跨模块规则：被指派人必须是线索所属项目的成员
pub struct LeadAssignmentRule<R> {
    leads: R,
    projects: Arc<dyn ProjectDirectory>,
}

impl<R: LeadRepository> LeadAssignmentRule<R> {
    pub fn new(leads: R, projects: Arc<dyn ProjectDirectory>) -> Self {
        Self { leads, projects }
    }
}

#[async_trait]
impl<R: LeadRepository> ValidationRule for LeadAssignmentRule<R> {
    fn rule_name(&self) -> &str {
        "lead.assignment.project-membership"
    }

    async fn check(&self, payload: &Map<String, Value>) -> DomainResult<Vec<String>> {
        let (Some(lead_id), Some(assigned_to)) = (
            payload.get("lead_id").and_then(Value::as_u64),
            payload.get("assigned_to").and_then(Value::as_u64),
        ) else {
            return Ok(Vec::new());
        };

        // 线索不存在 ⇒ 交给 Handler 报 NotFound
        let Some(lead) = self.leads.find(&lead_id).await? else {
            return Ok(Vec::new());
        };

        if !self.projects.is_member(lead.project_id, assigned_to).await? {
            return Ok(vec![format!(
                "Usuário {assigned_to} não é membro do projeto {} do lead",
                lead.project_id
            )]);
        }

        Ok(Vec::new())
    }
}

/// lead.create 的跨模块规则：目标项目必须存在
pub struct LeadProjectRule {
    projects: Arc<dyn ProjectDirectory>,
}

impl LeadProjectRule {
    pub fn new(projects: Arc<dyn ProjectDirectory>) -> Self {
        Self { projects }
    }
}

#[async_trait]
impl ValidationRule for LeadProjectRule {
    fn rule_name(&self) -> &str {
        "lead.create.project-exists"
    }

    async fn check(&self, payload: &Map<String, Value>) -> DomainResult<Vec<String>> {
        let Some(project_id) = payload.get("project_id").and_then(Value::as_u64) else {
            return Ok(Vec::new());
        };
        if project_id == 0 {
            // 形状问题，Handler 负责
            return Ok(Vec::new());
        }

        if !self.projects.project_exists(project_id).await? {
            return Ok(vec![format!("Projeto {project_id} não encontrado")]);
        }

        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::Lead;
    use crate::repository::InMemoryLeadRepository;
    use serde_json::json;

    fn payload(entries: &[(&str, Value)]) -> Map<String, Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn non_members_are_rejected() {
        let repo = Arc::new(InMemoryLeadRepository::with_leads([Lead::new(
            42,
            3,
            "Ana",
            "ana@example.com",
            "+55 11 90000-0000",
        )]));
        let projects = Arc::new(StaticProjectDirectory::new());
        projects.add_member(3, 1);

        let rule = LeadAssignmentRule::new(repo, projects as Arc<dyn ProjectDirectory>);

        let violations = rule
            .check(&payload(&[("lead_id", json!(42)), ("assigned_to", json!(7))]))
            .await
            .unwrap();
        assert_eq!(
            violations,
            vec!["Usuário 7 não é membro do projeto 3 do lead".to_string()]
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn members_pass() {
        let repo = Arc::new(InMemoryLeadRepository::with_leads([Lead::new(
            42,
            3,
            "Ana",
            "ana@example.com",
            "+55 11 90000-0000",
        )]));
        let projects = Arc::new(StaticProjectDirectory::new());
        projects.add_member(3, 7);

        let rule = LeadAssignmentRule::new(repo, projects as Arc<dyn ProjectDirectory>);

        let violations = rule
            .check(&payload(&[("lead_id", json!(42)), ("assigned_to", json!(7))]))
            .await
            .unwrap();
        assert!(violations.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn missing_lead_is_left_to_the_handler() {
        let rule = LeadAssignmentRule::new(
            Arc::new(InMemoryLeadRepository::new()),
            Arc::new(StaticProjectDirectory::new()) as Arc<dyn ProjectDirectory>,
        );
        let violations = rule
            .check(&payload(&[("lead_id", json!(1)), ("assigned_to", json!(7))]))
            .await
            .unwrap();
        assert!(violations.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn unknown_projects_block_creation() {
        let rule = LeadProjectRule::new(Arc::new(StaticProjectDirectory::new()));
        let violations = rule
            .check(&payload(&[("project_id", json!(99))]))
            .await
            .unwrap();
        assert_eq!(violations, vec!["Projeto 99 não encontrado".to_string()]);
    }
}
