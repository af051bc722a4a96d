use service_status_core::model::SERVICES_LANDING_TYPE;
use service_status_core::{
    BlockConfiguration, MemoryStore, RecordingNoticeLog, Service, StatusCode, StatusRecord,
    StatusSummaryBuilder,
};
use service_status_render::SummaryRenderer;
use std::sync::Arc;

async fn render(store: MemoryStore, config: &BlockConfiguration) -> (String, Vec<String>) {
    let store = Arc::new(store);
    let notices = Arc::new(RecordingNoticeLog::new());
    let summary = StatusSummaryBuilder::new(store.clone(), store)
        .with_notices(notices.clone())
        .build_summary(config)
        .await;
    (SummaryRenderer::new().render_fragment(&summary), notices.entries())
}

#[tokio::test]
async fn default_text_with_service_status_link() {
    let config = BlockConfiguration::default().with_link("/service-status");
    let (html, notices) = render(MemoryStore::new(), &config).await;

    assert!(html.contains(
        r#"<a href="/service-status" class="call-out-box__link" title="More detail about status updates.">More detail about status updates.</a>"#
    ));
    assert!(notices.is_empty());
}

#[tokio::test]
async fn issues_and_normal_services() {
    let store = MemoryStore::new()
        .with_service(SERVICES_LANDING_TYPE, Service::new("1", "S1"))
        .with_service(SERVICES_LANDING_TYPE, Service::new("2", "S2"))
        .with_record(StatusRecord::new("1", StatusCode::HAS_ISSUES, true));
    let config = BlockConfiguration::default()
        .with_link("/status")
        .with_link_text("See more");

    let (html, _) = render(store, &config).await;
    let s1 = html.find(r#"<a href="/node/1">S1</a>"#).unwrap();
    let s2 = html.find(r#"<a href="/node/2">S2</a>"#).unwrap();
    assert!(s1 < s2);
    assert!(html.contains(r#"<li><i class="status-issues fa-solid fa-circle-info">Issues</i> <a href="/node/1">S1</a></li>"#));
    assert!(html.contains(r#"<li><i class="status-normal fa-sharp fa-solid fa-circle-check"></i> <a href="/node/2">S2</a></li>"#));
    assert!(html.contains(r#"<a href="/status" class="call-out-box__link" title="See more">See more</a>"#));
}

#[tokio::test]
async fn external_link_renders_placeholder() {
    let store = MemoryStore::new()
        .with_service(SERVICES_LANDING_TYPE, Service::new("5", "Service5"))
        .with_record(StatusRecord::new("5", StatusCode::SEVERE_IMPACT, true));
    let config = BlockConfiguration::default()
        .with_services(["0", "5"])
        .with_link("http://evil.example/x")
        .with_link_text("More");

    let (html, notices) = render(store, &config).await;
    assert_eq!(html.matches("<li>").count(), 1);
    assert!(html.contains("Severe</i> <a href=\"/node/5\">Service5</a>"));
    assert!(html.contains(r##"<a href="#" class="call-out-box__link" title="More">More</a>"##));
    assert!(!html.contains("evil.example"));
    assert_eq!(notices, vec!["Invalid link: http://evil.example/x"]);
}
