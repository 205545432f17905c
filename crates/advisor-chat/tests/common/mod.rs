#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use advisor_api::{
    ApiError, ChatApi, Citation, EntryKind, HealthReport, HistoryEntry, QueryReply,
    SessionSummary,
};
use advisor_chat::Orchestrator;
use advisor_config::ChatConfig;
use async_trait::async_trait;
use tokio::sync::Semaphore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Health,
    Query {
        question: String,
        session_id: Option<String>,
    },
    ListSessions,
    Messages(String),
    Delete(String),
}

/// A backend whose answers are set up front by the test.
///
/// Queries and history loads can be held at a gate until the test adds
/// permits, to observe the state while they are in flight.
pub struct ScriptedApi {
    health: Mutex<Result<HealthReport, ApiError>>,
    replies: Mutex<VecDeque<Result<QueryReply, ApiError>>>,
    sessions: Mutex<Result<Vec<SessionSummary>, ApiError>>,
    histories: Mutex<HashMap<String, Result<Vec<HistoryEntry>, ApiError>>>,
    deletes: Mutex<VecDeque<Result<(), ApiError>>>,
    calls: Mutex<Vec<Call>>,
    query_gate: Option<Arc<Semaphore>>,
    history_gate: Option<Arc<Semaphore>>,
}

impl ScriptedApi {
    pub fn new(health: Result<HealthReport, ApiError>) -> Self {
        Self {
            health: Mutex::new(health),
            replies: Mutex::new(VecDeque::new()),
            sessions: Mutex::new(Ok(Vec::new())),
            histories: Mutex::new(HashMap::new()),
            deletes: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            query_gate: None,
            history_gate: None,
        }
    }

    pub fn healthy() -> Self {
        Self::new(Ok(report(true)))
    }

    pub fn gate_queries(mut self, gate: Arc<Semaphore>) -> Self {
        self.query_gate = Some(gate);
        self
    }

    pub fn gate_histories(mut self, gate: Arc<Semaphore>) -> Self {
        self.history_gate = Some(gate);
        self
    }

    pub fn push_reply(&self, reply: Result<QueryReply, ApiError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn set_sessions(&self, sessions: Result<Vec<SessionSummary>, ApiError>) {
        *self.sessions.lock().unwrap() = sessions;
    }

    pub fn set_history(&self, id: &str, history: Result<Vec<HistoryEntry>, ApiError>) {
        self.histories.lock().unwrap().insert(id.to_string(), history);
    }

    pub fn push_delete(&self, result: Result<(), ApiError>) {
        self.deletes.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn query_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Query { .. }))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

async fn pass(gate: &Option<Arc<Semaphore>>) {
    if let Some(gate) = gate {
        gate.acquire().await.unwrap().forget();
    }
}

#[async_trait]
impl ChatApi for ScriptedApi {
    async fn health(&self) -> Result<HealthReport, ApiError> {
        self.record(Call::Health);
        self.health.lock().unwrap().clone()
    }

    async fn query(
        &self,
        question: &str,
        session_id: Option<&str>,
    ) -> Result<QueryReply, ApiError> {
        self.record(Call::Query {
            question: question.to_string(),
            session_id: session_id.map(String::from),
        });
        pass(&self.query_gate).await;
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted reply".into())))
    }

    async fn list_sessions(&self) -> Result<Vec<SessionSummary>, ApiError> {
        self.record(Call::ListSessions);
        self.sessions.lock().unwrap().clone()
    }

    async fn session_messages(&self, session_id: &str) -> Result<Vec<HistoryEntry>, ApiError> {
        self.record(Call::Messages(session_id.to_string()));
        pass(&self.history_gate).await;
        self.histories
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .unwrap_or_else(|| {
                Err(ApiError::Status {
                    status: 404,
                    body: "not found".into(),
                })
            })
    }

    async fn delete_session(&self, session_id: &str) -> Result<(), ApiError> {
        self.record(Call::Delete(session_id.to_string()));
        self.deletes.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}

pub fn report(ready: bool) -> HealthReport {
    HealthReport {
        status: if ready { "healthy" } else { "unhealthy" }.into(),
        neo4j_connected: ready,
        documents_loaded: ready,
        message: None,
        error: (!ready).then(|| "graph database unreachable".to_string()),
    }
}

pub fn reply(answer: &str, sources: &[&str], session_id: Option<&str>) -> QueryReply {
    QueryReply {
        answer: Some(answer.into()),
        sources: sources.iter().map(|s| Citation::new(*s)).collect(),
        session_id: session_id.map(String::from),
    }
}

pub fn summary(id: &str, name: &str) -> SessionSummary {
    SessionSummary {
        id: id.into(),
        name: name.into(),
        updated_at: "2026-10-18T09:30:00Z".into(),
    }
}

pub fn entry(kind: EntryKind, content: &str) -> HistoryEntry {
    HistoryEntry {
        kind,
        content: content.into(),
        timestamp: "09:30".into(),
    }
}

/// Orchestrator over `api` that has finished its startup requests.
pub async fn started(api: &Arc<ScriptedApi>) -> Orchestrator {
    let mut orch = Orchestrator::new(api.clone(), ChatConfig::default());
    orch.start();
    orch.settle().await;
    orch
}
