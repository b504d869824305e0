// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! HTML 模板
//!
//! 所有插入的动态文本均经过转义

use crate::domain::models::blog_post::BlogPost;
use crate::domain::models::form_submission::FormSubmission;
use crate::domain::models::newsletter::NewsletterDraft;
use crate::domain::models::research_item::ContentResearchItem;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

const DEEP_DIVE_SECTION: &str = r#"<section class="deep-dive">
  <h2>What This Means for Your Business</h2>
  <p>Trends only matter when they turn into action. Pick one idea from this roundup, test it on a single channel for two weeks and measure the result against your current baseline before rolling it out further.</p>
  <ul>
    <li>Audit which of your current campaigns could be automated without losing the personal touch.</li>
    <li>Refresh your top three pages so they answer the questions your customers actually ask.</li>
    <li>Make sure every piece of content ends with one clear next step.</li>
  </ul>
</section>"#;

const CTA_SECTION: &str = r#"<section class="cta">
  <h2>Ready to Put These Insights to Work?</h2>
  <p>Our team helps growing businesses turn marketing trends into measurable results.</p>
  <p><a class="button" href="/contact">Book a free consultation</a> or <a href="/newsletter">subscribe to our monthly newsletter</a>.</p>
</section>"#;

fn paragraphs(text: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{}</p>", encode_text(p)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 渲染博客正文
pub fn render_blog_html(
    title: &str,
    analysis: &str,
    research: &[ContentResearchItem],
    featured_image: &str,
) -> String {
    let mut html = String::new();

    html.push_str("<article class=\"blog-post\">\n");
    let _ = writeln!(html, "<h1>{}</h1>", encode_text(title));

    if !featured_image.is_empty() {
        let _ = writeln!(
            html,
            "<figure class=\"featured-image\"><img src=\"{}\" alt=\"{}\"></figure>",
            encode_double_quoted_attribute(featured_image),
            encode_double_quoted_attribute(title)
        );
    }

    html.push_str("<section class=\"analysis\">\n");
    html.push_str(&paragraphs(analysis));
    html.push_str("\n</section>\n");

    html.push_str("<section class=\"research\">\n<h2>This Week's Key Developments</h2>\n");
    for item in research {
        let _ = writeln!(
            html,
            "<div class=\"research-item\"><h3><a href=\"{}\">{}</a></h3><p>{}</p><p class=\"source\">Source: {}</p></div>",
            encode_double_quoted_attribute(&item.url),
            encode_text(&item.title),
            encode_text(&item.summary),
            encode_text(&item.source)
        );
    }
    html.push_str("</section>\n");

    html.push_str(DEEP_DIVE_SECTION);
    html.push('\n');
    html.push_str(CTA_SECTION);
    html.push_str("\n</article>\n");
    html
}

fn post_url(public_url: &str, post: &BlogPost) -> String {
    format!("{}/blog/{}", public_url.trim_end_matches('/'), post.slug)
}

/// 渲染新闻通讯 HTML
pub fn render_newsletter_html(draft: &NewsletterDraft, posts: &[BlogPost], public_url: &str) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html><body>\n<div class=\"newsletter\">\n");
    let _ = writeln!(html, "<h1>{}</h1>", encode_text(&draft.subject));
    html.push_str(&paragraphs(&draft.content));
    html.push('\n');

    if !posts.is_empty() {
        html.push_str("<h2>Recent Articles</h2>\n<ul>\n");
        for post in posts {
            let _ = writeln!(
                html,
                "<li><a href=\"{}\">{}</a><br>{}</li>",
                encode_double_quoted_attribute(&post_url(public_url, post)),
                encode_text(&post.title),
                encode_text(&post.excerpt)
            );
        }
        html.push_str("</ul>\n");
    }

    html.push_str("<p class=\"footer\">You are receiving this email because you subscribed to our newsletter.</p>\n");
    html.push_str("</div>\n</body></html>\n");
    html
}

/// 新闻通讯的纯文本版本
pub fn render_newsletter_text(draft: &NewsletterDraft, posts: &[BlogPost], public_url: &str) -> String {
    let mut text = format!("{}\n\n{}\n", draft.subject, draft.content.trim());
    if !posts.is_empty() {
        text.push_str("\nRecent Articles\n");
        for post in posts {
            let _ = writeln!(text, "- {}: {}", post.title, post_url(public_url, post));
        }
    }
    text
}

/// 表单提交通知邮件，返回 (主题, HTML, 纯文本)
pub fn render_form_notification(submission: &FormSubmission) -> (String, String, String) {
    let subject = format!(
        "New {} submission from {}",
        submission.form_type.label(),
        submission.name
    );

    let fields: Vec<(&str, String)> = vec![
        ("Form", submission.form_type.label().to_string()),
        ("Name", submission.name.clone()),
        ("Email", submission.email.clone()),
        ("Company", submission.company.clone().unwrap_or_default()),
        ("Phone", submission.phone.clone().unwrap_or_default()),
        ("Message", submission.message.clone().unwrap_or_default()),
        (
            "Newsletter opt-in",
            if submission.newsletter_opt_in { "yes" } else { "no" }.to_string(),
        ),
        ("Source", submission.source.clone().unwrap_or_default()),
        ("Submitted at", submission.created_at.to_rfc3339()),
    ];

    let mut html = String::from("<h2>New form submission</h2>\n<table>\n");
    let mut text = String::new();
    for (label, value) in fields.iter().filter(|(_, v)| !v.is_empty()) {
        let _ = writeln!(
            html,
            "<tr><th align=\"left\">{}</th><td>{}</td></tr>",
            label,
            encode_text(value)
        );
        let _ = writeln!(text, "{}: {}", label, value);
    }
    html.push_str("</table>\n");

    (subject, html, text)
}
