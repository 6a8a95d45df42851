//! In-memory stand-in for the todo backend.
//!
//! Speaks the same wire shape the client expects from the real service:
//! HAL items and collections under `/todos`, numeric server-assigned ids,
//! upserting `PUT`, and a `/fact` endpoint that proxies an upstream fact
//! service and falls back to a canned fact when that fails.

use std::{collections::BTreeMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};

pub const FALLBACK_FACT: &str = "some cats throw exceptions.";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct TodoInput {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    pub href: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_link: Link,
}

impl Links {
    fn to(href: String) -> Self {
        Self {
            self_link: Link { href },
        }
    }
}

/// A todo as a HAL item.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoResource {
    #[serde(flatten)]
    pub todo: Todo,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl From<Todo> for TodoResource {
    fn from(todo: Todo) -> Self {
        let links = Links::to(format!("/todos/{}", todo.id));
        Self { todo, links }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmbeddedTodos {
    pub todos: Vec<TodoResource>,
}

/// The HAL collection envelope for `GET /todos`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoCollection {
    #[serde(rename = "_embedded")]
    pub embedded: EmbeddedTodos,
    #[serde(rename = "_links")]
    pub links: Links,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatFact {
    pub text: String,
}

impl CatFact {
    pub fn fallback() -> Self {
        Self {
            text: FALLBACK_FACT.to_string(),
        }
    }
}

/// Where `/fact` gets its facts from.
#[derive(Clone, Debug)]
pub struct FactSource {
    upstream: Option<String>,
    agent: ureq::Agent,
}

impl FactSource {
    const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(5);

    /// Always serve the fallback fact.
    pub fn offline() -> Self {
        Self::build(None)
    }

    pub fn upstream(url: impl Into<String>) -> Self {
        Self::build(Some(url.into()))
    }

    fn build(upstream: Option<String>) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(Self::UPSTREAM_TIMEOUT))
            .build()
            .new_agent();
        Self { upstream, agent }
    }

    async fn fetch(&self) -> CatFact {
        let Some(url) = self.upstream.clone() else {
            return CatFact::fallback();
        };
        let agent = self.agent.clone();
        match tokio::task::spawn_blocking(move || fetch_fact(&agent, &url)).await {
            Ok(Ok(fact)) => fact,
            Ok(Err(e)) => {
                warn!(error = %e, "upstream fact fetch failed, serving fallback");
                CatFact::fallback()
            }
            Err(e) => {
                warn!(error = %e, "fact fetch task failed, serving fallback");
                CatFact::fallback()
            }
        }
    }
}

fn fetch_fact(
    agent: &ureq::Agent,
    url: &str,
) -> Result<CatFact, Box<dyn std::error::Error + Send + Sync>> {
    let mut response = agent.get(url).call()?;
    let body = response.body_mut().read_to_string()?;
    Ok(serde_json::from_str(&body)?)
}

/// `next_id` is always above every stored id; `None` once the id space is used up.
struct Store {
    next_id: Option<i64>,
    todos: BTreeMap<i64, Todo>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            next_id: Some(1),
            todos: BTreeMap::new(),
        }
    }
}

impl Store {
    fn allocate_id(&mut self) -> Option<i64> {
        let id = self.next_id?;
        self.next_id = id.checked_add(1);
        Some(id)
    }

    /// Keep server-assigned ids clear of an id chosen by the caller.
    fn reserve(&mut self, id: i64) {
        if let Some(next) = self.next_id {
            if id >= next {
                self.next_id = id.checked_add(1);
            }
        }
    }
}

#[derive(Clone)]
struct AppState {
    store: Arc<RwLock<Store>>,
    facts: FactSource,
}

pub fn app() -> Router {
    app_with(FactSource::offline())
}

pub fn app_with(facts: FactSource) -> Router {
    let state = AppState {
        store: Arc::new(RwLock::new(Store::default())),
        facts,
    };
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).put(replace_todo).delete(delete_todo))
        .route("/fact", get(fact))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, FactSource::offline()).await
}

pub async fn run_with(listener: TcpListener, facts: FactSource) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(facts)).await
}

async fn list_todos(State(state): State<AppState>) -> Json<TodoCollection> {
    let store = state.store.read().await;
    Json(TodoCollection {
        embedded: EmbeddedTodos {
            todos: store.todos.values().cloned().map(TodoResource::from).collect(),
        },
        links: Links::to("/todos".to_string()),
    })
}

async fn create_todo(
    State(state): State<AppState>,
    Json(input): Json<TodoInput>,
) -> Result<(StatusCode, Json<TodoResource>), StatusCode> {
    let mut store = state.store.write().await;
    let Some(id) = store.allocate_id() else {
        warn!("id space exhausted, rejecting create");
        return Err(StatusCode::INSUFFICIENT_STORAGE);
    };
    let todo = Todo {
        id,
        title: input.title,
        completed: input.completed,
    };
    store.todos.insert(id, todo.clone());
    info!(id, "created todo");
    Ok((StatusCode::CREATED, Json(todo.into())))
}

async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TodoResource>, StatusCode> {
    let store = state.store.read().await;
    store
        .todos
        .get(&id)
        .cloned()
        .map(|todo| Json(todo.into()))
        .ok_or(StatusCode::NOT_FOUND)
}

/// Full replacement. An unknown id is created in place.
async fn replace_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<TodoInput>,
) -> (StatusCode, Json<TodoResource>) {
    let mut store = state.store.write().await;
    let todo = Todo {
        id,
        title: input.title,
        completed: input.completed,
    };
    let status = match store.todos.insert(id, todo.clone()) {
        Some(_) => StatusCode::OK,
        None => {
            store.reserve(id);
            StatusCode::CREATED
        }
    };
    (status, Json(todo.into()))
}

async fn delete_todo(State(state): State<AppState>, Path(id): Path<i64>) -> StatusCode {
    let mut store = state.store.write().await;
    match store.todos.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

async fn fact(State(state): State<AppState>) -> Json<CatFact> {
    Json(state.facts.fetch().await)
}
