pub mod chat;
pub mod contact;

pub async fn health() -> &'static str {
    "OK"
}
