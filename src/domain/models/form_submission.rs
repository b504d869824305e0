// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 表单提交（联系表单、线索表单等）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSubmission {
    pub id: Uuid,
    pub form_type: FormType,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    /// 是否订阅新闻通讯
    pub newsletter_opt_in: bool,
    /// 提交来源页面
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormType {
    Contact,
    Lead,
    Consultation,
    Newsletter,
}

impl FormType {
    /// 通知邮件中使用的可读名称
    pub fn label(&self) -> &'static str {
        match self {
            FormType::Contact => "Contact Form",
            FormType::Lead => "Lead Capture",
            FormType::Consultation => "Consultation Request",
            FormType::Newsletter => "Newsletter Signup",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FormType::Contact => write!(f, "contact"),
            FormType::Lead => write!(f, "lead"),
            FormType::Consultation => write!(f, "consultation"),
            FormType::Newsletter => write!(f, "newsletter"),
        }
    }
}

impl FromStr for FormType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contact" => Ok(FormType::Contact),
            "lead" => Ok(FormType::Lead),
            "consultation" => Ok(FormType::Consultation),
            "newsletter" => Ok(FormType::Newsletter),
            _ => Err(()),
        }
    }
}
