pub async fn healthcheck() -> &'static str {
    "OK"
}
