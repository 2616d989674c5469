use crate::domain::chat::Update;
use crate::domain::model::ScoringPolicy;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn bot_token(&self) -> &str;
    fn api_base_url(&self) -> &str;
    /// `None` disables the health endpoint.
    fn health_addr(&self) -> Option<String>;
    fn footer(&self) -> &str;
    fn scoring_policy(&self) -> ScoringPolicy;
    /// `0` keeps pending requests forever.
    fn pending_ttl_secs(&self) -> u64;
    fn poll_timeout_secs(&self) -> u64;
    fn max_upload_bytes(&self) -> u64;
}

#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>>;
    async fn send_message(&self, chat_id: i64, text: &str, markdown: bool) -> Result<()>;
    async fn get_file_bytes(&self, file_id: &str) -> Result<Vec<u8>>;
    async fn send_document(
        &self,
        chat_id: i64,
        file_name: &str,
        data: Vec<u8>,
        caption: &str,
    ) -> Result<()>;
}
