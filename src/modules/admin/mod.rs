//! Admin entry gate. Clients exchange the admin password for a yes/no before
//! showing admin tooling; every mutating route re-checks it independently.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use shelf_authz::AdminGuard;
use shelf_http::error::AppResult;
use shelf_kernel::{InitCtx, Module};

use crate::modules::books::models::Acknowledgement;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRequest {
    pub password: String,
}

pub struct AdminModule {
    guard: AdminGuard,
}

impl AdminModule {
    pub fn new(guard: AdminGuard) -> Self {
        Self { guard }
    }
}

#[async_trait]
impl Module for AdminModule {
    fn name(&self) -> &'static str {
        "admin"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        if self.guard.is_open() {
            tracing::warn!(
                module = self.name(),
                "no admin password configured; book mutations are unauthenticated"
            );
        }
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "admin module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/session", post(open_session))
            .with_state(self.guard.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/session": {
                    "post": {
                        "summary": "Check the admin password",
                        "tags": ["Admin"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/SessionRequest" }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Password accepted",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Acknowledgement" }
                                    }
                                }
                            },
                            "401": {
                                "description": "Incorrect password",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "SessionRequest": {
                        "type": "object",
                        "properties": { "password": { "type": "string" } },
                        "required": ["password"]
                    }
                }
            }
        }))
    }
}

async fn open_session(
    State(guard): State<AdminGuard>,
    payload: Result<Json<SessionRequest>, JsonRejection>,
) -> AppResult<Json<Acknowledgement>> {
    let Json(request) = payload?;
    guard.verify(Some(request.password.as_str()))?;

    tracing::info!("admin session granted");
    Ok(Json(Acknowledgement::new("Access granted")))
}

pub fn create_module(guard: AdminGuard) -> Arc<dyn Module> {
    Arc::new(AdminModule::new(guard))
}
