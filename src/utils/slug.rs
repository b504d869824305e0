// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::NaiveDate;
use deunicode::deunicode;

/// 标题部分的最大长度
const MAX_TITLE_SLUG_LEN: usize = 80;

/// 将任意文本转换为 URL 安全的 slug
///
/// 非 ASCII 字符先音译，再把所有非字母数字字符折叠为单个连字符。
/// 对已经是 slug 的输入再次调用结果不变。
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text).to_lowercase();
    let mut slug = String::with_capacity(ascii.len());

    for ch in ascii.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    if slug.len() > MAX_TITLE_SLUG_LEN {
        // 在单词边界截断；单个超长单词才硬截断
        let cut = if slug.as_bytes()[MAX_TITLE_SLUG_LEN] == b'-' {
            MAX_TITLE_SLUG_LEN
        } else {
            slug[..MAX_TITLE_SLUG_LEN]
                .rfind('-')
                .unwrap_or(MAX_TITLE_SLUG_LEN)
        };
        slug.truncate(cut);
    }
    slug.trim_end_matches('-').to_string()
}

/// 生成文章 slug：`YYYY-MM-DD-<标题>`
///
/// 同一天相同标题得到相同 slug
pub fn generate_slug(date: NaiveDate, title: &str) -> String {
    let title_part = slugify(title);
    let title_part = if title_part.is_empty() {
        "post".to_string()
    } else {
        title_part
    };
    format!("{}-{}", date.format("%Y-%m-%d"), title_part)
}
