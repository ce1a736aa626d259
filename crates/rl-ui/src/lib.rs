//! # rl-ui
//!
//! Askama templates for the front page and the submit form.

use askama::Template;
use chrono::{DateTime, Utc};
use rl_core::models::Submission;
use url::Url;
use uuid::Uuid;

/// Hostname of `url`, or `None` when it does not parse or has no host.
pub fn host(url: &str) -> Option<String> {
    Url::parse(url).ok()?.host_str().map(str::to_owned)
}

/// `url` as a link target, only for http and https.
pub fn safe_href(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    matches!(parsed.scheme(), "http" | "https").then(|| parsed.to_string())
}

/// One line of the front page, already formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRow {
    /// 1-based position on the page
    pub rank: usize,
    pub id: Uuid,
    pub title: String,
    pub url: String,
    /// Link target; `None` renders the title as plain text
    pub href: Option<String>,
    /// Empty when the url has no parsable host
    pub host: String,
    pub score: String,
    pub age: i64,
}

impl SubmissionRow {
    pub fn from_submission(rank: usize, submission: &Submission, now: DateTime<Utc>) -> Self {
        Self {
            rank,
            id: submission.id,
            title: submission.title.clone(),
            url: submission.url.clone(),
            href: safe_href(&submission.url),
            host: host(&submission.url).unwrap_or_default(),
            score: format!("{:.2}", submission.score),
            age: submission.age(now),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub rows: Vec<SubmissionRow>,
}

impl IndexTemplate {
    /// Rows keep the order of `submissions`.
    pub fn new(submissions: &[Submission], now: DateTime<Utc>) -> Self {
        let rows = submissions
            .iter()
            .enumerate()
            .map(|(i, s)| SubmissionRow::from_submission(i + 1, s, now))
            .collect();
        Self { rows }
    }
}

#[derive(Template)]
#[template(path = "new.html")]
pub struct NewTemplate;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rl_core::models::NewSubmission;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn submission(title: &str, url: &str) -> Submission {
        Submission::new(NewSubmission::parse(title, url).unwrap(), t0())
    }

    #[test]
    fn host_is_parsed_from_url() {
        assert_eq!(host("http://example.com/x").as_deref(), Some("example.com"));
        assert_eq!(
            host("https://news.example.org:8443/a?b=c").as_deref(),
            Some("news.example.org")
        );
    }

    #[test]
    fn host_is_absent_for_unparsable_urls() {
        assert_eq!(host("example.com"), None);
        assert_eq!(host("not a url"), None);
        assert_eq!(host("mailto:someone@example.com"), None);
    }

    #[test]
    fn row_formats_score_and_age() {
        let mut sub = submission("Rust", "http://example.com/x");
        for _ in 0..5 {
            sub.upvote(t0());
        }
        let row = SubmissionRow::from_submission(1, &sub, t0() + Duration::hours(3));
        assert_eq!(row.host, "example.com");
        assert_eq!(row.score, "1.15");
        assert_eq!(row.age, 3);
    }

    #[test]
    fn index_renders_rows_in_order() {
        let subs = vec![
            submission("First", "http://one.example/"),
            submission("Second", "garbage"),
        ];
        let html = IndexTemplate::new(&subs, t0()).render().unwrap();

        let first = html.find("First").unwrap();
        let second = html.find("Second").unwrap();
        assert!(first < second);
        assert!(html.contains("(one.example)"));
        assert!(html.contains("()"));
        assert!(html.contains(&format!("/upvote/{}", subs[0].id)));
        assert!(html.contains("0.00 points, 0 hours ago"));
    }

    #[test]
    fn index_escapes_markup_in_titles() {
        let subs = vec![submission("<script>alert(1)</script>", "http://example.com")];
        let html = IndexTemplate::new(&subs, t0()).render().unwrap();
        assert!(!html.contains("<script>"));
        assert!(!html.contains("</script>"));
        assert!(html.contains("script"));
        assert!(html.contains("alert(1)"));
    }

    #[test]
    fn only_web_urls_become_links() {
        assert_eq!(safe_href("http://example.com/x").as_deref(), Some("http://example.com/x"));
        assert!(safe_href("https://example.com").is_some());
        assert_eq!(safe_href("javascript:alert(document.cookie)"), None);
        assert_eq!(safe_href("JavaScript:alert(1)"), None);
        assert_eq!(safe_href("data:text/html,hi"), None);
        assert_eq!(safe_href("example.com"), None);
    }

    #[test]
    fn script_urls_render_as_plain_text() {
        let subs = vec![submission("click", "javascript:alert(document.cookie)")];
        let html = IndexTemplate::new(&subs, t0()).render().unwrap();
        assert!(!html.contains("href=\"javascript:"));
        assert!(html.contains("click"));
        assert!(html.contains(&format!("/upvote/{}", subs[0].id)));
    }

    #[test]
    fn new_form_posts_title_and_url() {
        let html = NewTemplate.render().unwrap();
        assert!(html.contains(r#"action="/create""#));
        assert!(html.contains(r#"name="title""#));
        assert!(html.contains(r#"name="url""#));
    }
}
