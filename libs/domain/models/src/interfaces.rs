// [libs/domain/models/src/interfaces.rs]
/*!
 * APARATO: CONSUMED INTERFACES (ESTRATO L2)
 * RESPONSABILIDAD: Contratos estrechos hacia los colaboradores fuera
 * de alcance (spec.md 6): cliente de inferencia, sandbox, y la
 * senal de despertar. El motor nunca implementa estos contratos, solo
 * los declara y los reenvia a traves del contexto de cada tick.
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatOptions {
    pub model: String,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub text: String,
    pub tool_calls: Vec<String>,
    pub tokens_in: u32,
    pub tokens_out: u32,
    pub finish_reason: String,
}

/// The language-model inference client. Used by tasks, never by the
/// engine core directly (spec.md 6).
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn chat(
        &self,
        system: &str,
        messages: &[ChatMessage],
        tools: &[String],
        options: &ChatOptions,
    ) -> Result<ChatResponse, String>;
}

/// The sandbox execution API (remote shell / file I/O / credits /
/// on-chain adapters). The engine passes this through task context
/// unexamined; it never calls it itself (spec.md 6).
#[async_trait]
pub trait SandboxClient: Send + Sync {
    async fn exec(&self, command: &str) -> Result<String, String>;
    async fn read_file(&self, path: &str) -> Result<Vec<u8>, String>;
    async fn write_file(&self, path: &str, contents: &[u8]) -> Result<(), String>;
    async fn expose_port(&self, port: u16) -> Result<String, String>;
    async fn credits_balance(&self) -> Result<i64, String>;
    async fn transfer_credits(&self, to: &str, amount_cents: i64) -> Result<(), String>;
    async fn list_models(&self) -> Result<Vec<String>, String>;
}

/// Tasks may request the agent be woken outside its current cycle;
/// the engine forwards the request without interpreting it.
pub trait WakeCallback: Send + Sync {
    fn on_wake_request(&self, reason: &str);
}

/// No-op double used by the engine's own tests and by a task that has
/// no reason to ever request an out-of-cycle wake.
pub struct NullWakeCallback;

impl WakeCallback for NullWakeCallback {
    fn on_wake_request(&self, _reason: &str) {}
}
