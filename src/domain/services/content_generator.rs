// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::blog_post::{BlogPost, PostStatus};
use crate::domain::models::newsletter::NewsletterDraft;
use crate::domain::models::research_item::ContentResearchItem;
use crate::domain::services::image_service::{ImageRequest, ImageServiceTrait};
use crate::domain::services::llm_service::{
    strip_code_fences, ChatRequest, GenerationError, LLMServiceTrait,
};
use crate::domain::services::templates;
use crate::utils::slug::generate_slug;
use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// 入选文章的最低评分（不含）
pub const SELECTION_THRESHOLD: i32 = 6;
/// 入选文章的最大数量
pub const MAX_SELECTED_RESEARCH: usize = 5;

const EXCERPT_MAX_CHARS: usize = 160;
const MAX_TAGS: usize = 8;
const NEWSLETTER_MAX_TOKENS: u32 = 1200;
const FALLBACK_CATEGORY: &str = "Marketing Strategy";

const BLOG_SYSTEM_PROMPT: &str = "You are a senior marketing strategist writing for small and \
mid-sized business owners. Write clear, practical analysis in plain prose without headings, \
lists or markdown.";

const NEWSLETTER_SYSTEM_PROMPT: &str = "You write a friendly monthly marketing newsletter. \
Respond with a JSON object containing exactly two string fields: \"subject\" and \"content\". \
Do not wrap the JSON in markdown.";

const FALLBACK_SUBJECT: &str = "Your Monthly Marketing Roundup";
const FALLBACK_CONTENT: &str = "Here is what caught our attention in marketing this month.\n\n\
AI tools keep getting better at the repetitive parts of marketing, which leaves more time for \
strategy and creative work. Search is evolving too, so publishing genuinely useful content \
matters more than ever.\n\n\
Take a look at our latest articles below, and reply to this email if you would like help \
putting any of these ideas into practice.";

/// 生成结果
///
/// 区分真正生成的内容和兜底内容，调用方可据此标记记录
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome<T> {
    Generated(T),
    Fallback(T),
}

impl<T> GenerationOutcome<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, GenerationOutcome::Fallback(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            GenerationOutcome::Generated(v) | GenerationOutcome::Fallback(v) => v,
        }
    }
}

struct TopicRule {
    terms: &'static [&'static str],
    title: &'static str,
    category: &'static str,
}

/// 标题规则，按顺序匹配，先命中者生效
const TOPIC_RULES: &[TopicRule] = &[
    TopicRule {
        terms: &["ai", "artificial intelligence", "chatgpt", "automation"],
        title: "How AI Is Reshaping Marketing Right Now",
        category: "AI & Automation",
    },
    TopicRule {
        terms: &["seo", "search"],
        title: "SEO Moves That Matter This Week",
        category: "SEO",
    },
    TopicRule {
        terms: &["social media", "instagram", "tiktok", "linkedin"],
        title: "Social Media Strategies Winning Attention Today",
        category: "Social Media",
    },
    TopicRule {
        terms: &["email", "newsletter"],
        title: "Email Marketing Tactics That Drive Results",
        category: "Email Marketing",
    },
    TopicRule {
        terms: &["content", "video", "youtube"],
        title: "Content Marketing Trends You Can Use Today",
        category: "Content Marketing",
    },
];

fn matching_rule(top: &[ContentResearchItem]) -> Option<&'static TopicRule> {
    let keywords: Vec<String> = top
        .iter()
        .flat_map(|item| item.keywords.iter().map(|k| k.trim().to_lowercase()))
        .collect();

    TOPIC_RULES
        .iter()
        .find(|rule| rule.terms.iter().any(|term| keywords.iter().any(|k| k == term)))
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// 选出评分大于 6 的前 5 条研究数据
///
/// 按评分降序稳定排序，同分保持原有顺序
pub fn select_top_research(items: &[ContentResearchItem]) -> Vec<ContentResearchItem> {
    let mut selected: Vec<ContentResearchItem> = items
        .iter()
        .filter(|item| item.relevance_score > SELECTION_THRESHOLD)
        .cloned()
        .collect();
    selected.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    selected.truncate(MAX_SELECTED_RESEARCH);
    selected
}

/// 根据关键词推导标题
///
/// 无规则命中时使用 "<星期> Marketing Insights: <首条标题>"
pub fn derive_title(top: &[ContentResearchItem], date: NaiveDate) -> String {
    if let Some(rule) = matching_rule(top) {
        return rule.title.to_string();
    }

    let topic = top
        .first()
        .map(|item| item.title.trim())
        .filter(|t| !t.is_empty())
        .unwrap_or("Industry Trends");
    format!("{} Marketing Insights: {}", weekday_name(date.weekday()), topic)
}

/// 根据关键词推导分类
pub fn derive_category(top: &[ContentResearchItem]) -> String {
    matching_rule(top)
        .map(|rule| rule.category)
        .unwrap_or(FALLBACK_CATEGORY)
        .to_string()
}

fn derive_tags(top: &[ContentResearchItem]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for keyword in top.iter().flat_map(|item| item.keywords.iter()) {
        let tag = keyword.trim().to_lowercase();
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags.truncate(MAX_TAGS);
    tags
}

fn derive_excerpt(analysis: &str) -> String {
    let flat = analysis.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= EXCERPT_MAX_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(EXCERPT_MAX_CHARS).collect();
    let cut = match cut.rfind(' ') {
        Some(idx) => &cut[..idx],
        None => cut.as_str(),
    };
    format!("{}...", cut.trim_end_matches([',', '.', ';', ':']))
}

fn build_analysis_prompt(title: &str, top: &[ContentResearchItem]) -> String {
    let mut prompt = format!(
        "Write a three paragraph analysis for a blog post titled \"{}\" based on these \
         developments:\n\n",
        title
    );
    for (i, item) in top.iter().enumerate() {
        prompt.push_str(&format!(
            "{}. {} ({}): {}\n",
            i + 1,
            item.title,
            item.source,
            item.summary
        ));
    }
    prompt.push_str("\nExplain why these matter for small businesses and what to do next.");
    prompt
}

fn build_newsletter_prompt(posts: &[BlogPost]) -> String {
    let mut prompt = String::from(
        "Draft this month's newsletter. Summarise the themes of the articles below in a warm, \
         concise tone (under 250 words) and pick a compelling subject line.\n\n",
    );
    if posts.is_empty() {
        prompt.push_str("No new articles were published this month; share general marketing tips.\n");
    }
    for post in posts {
        prompt.push_str(&format!("- {}: {}\n", post.title, post.excerpt));
    }
    prompt
}

fn social_snippets(title: &str, excerpt: &str, tags: &[String]) -> serde_json::Value {
    let hashtags = tags
        .iter()
        .take(3)
        .map(|t| format!("#{}", t.replace(' ', "")))
        .collect::<Vec<_>>()
        .join(" ");
    json!({
        "twitter": format!("{} {}", title, hashtags).trim().to_string(),
        "linkedin": format!("{}\n\n{}", title, excerpt),
        "facebook": format!("New on the blog: {}. {}", title, excerpt),
    })
}

#[derive(Deserialize)]
struct NewsletterReply {
    subject: String,
    content: String,
}

/// 兜底新闻通讯内容
pub fn fallback_newsletter() -> NewsletterDraft {
    NewsletterDraft {
        subject: FALLBACK_SUBJECT.to_string(),
        content: FALLBACK_CONTENT.to_string(),
    }
}

/// 解析模型返回的新闻通讯 JSON
///
/// 解析失败或字段为空时返回 `None`
pub fn parse_newsletter_reply(reply: &str) -> Option<NewsletterDraft> {
    let parsed: NewsletterReply = serde_json::from_str(strip_code_fences(reply)).ok()?;
    let subject = parsed.subject.trim();
    let content = parsed.content.trim();
    if subject.is_empty() || content.is_empty() {
        return None;
    }
    Some(NewsletterDraft {
        subject: subject.to_string(),
        content: content.to_string(),
    })
}

/// 内容生成器
///
/// 负责组装提示词、调用 LLM 与图片服务，并渲染 HTML 模板
pub struct ContentGenerator {
    llm: Arc<dyn LLMServiceTrait>,
    image: Arc<dyn ImageServiceTrait>,
    image_size: String,
    image_quality: String,
    public_url: String,
}

impl ContentGenerator {
    pub fn new(llm: Arc<dyn LLMServiceTrait>, image: Arc<dyn ImageServiceTrait>) -> Self {
        Self {
            llm,
            image,
            image_size: "1792x1024".to_string(),
            image_quality: "standard".to_string(),
            public_url: "http://localhost:3000".to_string(),
        }
    }

    pub fn with_image_options(mut self, size: impl Into<String>, quality: impl Into<String>) -> Self {
        self.image_size = size.into();
        self.image_quality = quality.into();
        self
    }

    pub fn with_public_url(mut self, public_url: impl Into<String>) -> Self {
        self.public_url = public_url.into();
        self
    }

    pub fn public_url(&self) -> &str {
        &self.public_url
    }

    /// 根据研究数据生成博客文章（草稿状态）
    ///
    /// # 错误
    ///
    /// * 没有评分大于 6 的研究数据时返回 `InsufficientResearch`
    /// * 文本生成失败时原样返回 LLM 错误
    ///
    /// 图片生成失败只记录日志，`featured_image` 为空字符串
    pub async fn generate_blog_post(
        &self,
        research: &[ContentResearchItem],
        now: DateTime<Utc>,
    ) -> Result<BlogPost, GenerationError> {
        let top = select_top_research(research);
        if top.is_empty() {
            return Err(GenerationError::InsufficientResearch);
        }

        let date = now.date_naive();
        let title = derive_title(&top, date);
        info!("Generating blog post '{}' from {} research items", title, top.len());

        let (analysis, usage) = self
            .llm
            .chat_completion(ChatRequest::new(
                BLOG_SYSTEM_PROMPT,
                build_analysis_prompt(&title, &top),
            ))
            .await?;
        let analysis = analysis.trim().to_string();
        info!("Analysis generated ({} tokens)", usage.total_tokens);

        let featured_image = match self
            .image
            .generate_image(ImageRequest {
                prompt: format!(
                    "Clean, modern editorial illustration for a marketing blog article titled \"{}\". No text.",
                    title
                ),
                size: self.image_size.clone(),
                quality: self.image_quality.clone(),
            })
            .await
        {
            Ok(url) => url,
            Err(e) => {
                warn!("Image generation failed, publishing without image: {}", e);
                String::new()
            }
        };

        let content = templates::render_blog_html(&title, &analysis, &top, &featured_image);
        let excerpt = derive_excerpt(&analysis);
        let tags = derive_tags(&top);
        let category = derive_category(&top);
        let snippets = social_snippets(&title, &excerpt, &tags);
        let source_data = json!({
            "generated_at": now,
            "research": top.iter().map(|item| json!({
                "id": item.id,
                "title": item.title,
                "url": item.url,
                "source": item.source,
                "relevance_score": item.relevance_score,
            })).collect::<Vec<_>>(),
        });

        Ok(BlogPost {
            id: Uuid::new_v4(),
            slug: generate_slug(date, &title),
            title,
            content,
            excerpt,
            tags,
            category,
            status: PostStatus::Draft,
            published_at: None,
            featured_image,
            source_data,
            social_snippets: snippets,
            created_at: now,
        })
    }

    /// 生成新闻通讯内容
    ///
    /// LLM 调用失败、回复不是预期 JSON 或字段为空时返回兜底内容
    pub async fn generate_newsletter_content(
        &self,
        posts: &[BlogPost],
    ) -> GenerationOutcome<NewsletterDraft> {
        let reply = self
            .llm
            .chat_completion(
                ChatRequest::new(NEWSLETTER_SYSTEM_PROMPT, build_newsletter_prompt(posts))
                    .with_temperature(0.6)
                    .with_max_tokens(NEWSLETTER_MAX_TOKENS),
            )
            .await;

        match reply {
            Ok((text, _)) => match parse_newsletter_reply(&text) {
                Some(draft) => GenerationOutcome::Generated(draft),
                None => {
                    warn!("Newsletter reply was not valid JSON, using fallback content");
                    GenerationOutcome::Fallback(fallback_newsletter())
                }
            },
            Err(e) => {
                warn!("Newsletter generation failed, using fallback content: {}", e);
                GenerationOutcome::Fallback(fallback_newsletter())
            }
        }
    }

    /// 渲染新闻通讯 HTML 与纯文本
    pub fn render_newsletter(&self, draft: &NewsletterDraft, posts: &[BlogPost]) -> (String, String) {
        (
            templates::render_newsletter_html(draft, posts, &self.public_url),
            templates::render_newsletter_text(draft, posts, &self.public_url),
        )
    }
}
