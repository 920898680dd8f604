use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::super::domain::{PortfolioAllocation, UserContact};
use super::format::{escape_html, format_jst, format_percent, format_yen};
use super::request::ReportedDiagnosis;

const FORM_NAME: &str = "【KAWARA版】ポートフォリオ診断テストフォーム";
const COPYRIGHT: &str = "© 株式会社投資の\"KAWARA\"版.com";

/// Rendered message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum EmailBody {
    Html(String),
    Text(String),
}

impl EmailBody {
    pub fn as_str(&self) -> &str {
        match self {
            EmailBody::Html(body) | EmailBody::Text(body) => body,
        }
    }

    pub fn is_html(&self) -> bool {
        matches!(self, EmailBody::Html(_))
    }
}

/// Subject plus body, ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailDocument {
    pub subject: String,
    pub body: EmailBody,
}

/// Output format of the admin notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminFormat {
    Text,
    Html,
}

impl AdminFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" => Some(Self::Text),
            "html" => Some(Self::Html),
            _ => None,
        }
    }
}

/// Which figures the admin notification lists per asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownKind {
    Amounts,
    Percentages,
}

impl BreakdownKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "amounts" | "amount" | "yen" => Some(Self::Amounts),
            "percentages" | "percentage" | "percent" => Some(Self::Percentages),
            _ => None,
        }
    }
}

/// Asset figures for the admin notification.
#[derive(Debug, Clone, Copy)]
pub enum AdminBreakdown<'a> {
    Amounts(&'a PortfolioAllocation),
    Percentages(&'a PortfolioAllocation),
}

impl<'a> AdminBreakdown<'a> {
    pub fn select(
        kind: BreakdownKind,
        amounts: &'a PortfolioAllocation,
        percentages: &'a PortfolioAllocation,
    ) -> Self {
        match kind {
            BreakdownKind::Amounts => Self::Amounts(amounts),
            BreakdownKind::Percentages => Self::Percentages(percentages),
        }
    }

    fn lines(&self) -> Vec<(&'static str, String)> {
        match self {
            AdminBreakdown::Amounts(amounts) => {
                let mut lines: Vec<(&'static str, String)> = amounts
                    .non_zero_entries()
                    .map(|(asset, value)| (asset.admin_label(), format!("¥{}", format_yen(value))))
                    .collect();
                lines.push(("総資産額", format!("¥{}", format_yen(amounts.total()))));
                lines
            }
            AdminBreakdown::Percentages(percentages) => percentages
                .non_zero_entries()
                .map(|(asset, value)| (asset.admin_label(), format!("{}%", format_percent(value))))
                .collect(),
        }
    }
}

pub fn user_subject(outcome: &ReportedDiagnosis) -> String {
    format!(
        "【診断結果】{} {} - ポートフォリオ診断テスト",
        outcome.emoji, outcome.title
    )
}

pub fn admin_subject(contact: &UserContact) -> String {
    format!("【ポートフォリオ診断結果】{} 様", contact.name)
}

/// HTML result report sent to the person who took the quiz.
///
/// `allocation` holds percentages; assets at or below zero are left out of the breakdown.
pub fn render_user_email(
    contact: &UserContact,
    allocation: &PortfolioAllocation,
    total_amount: f64,
    outcome: &ReportedDiagnosis,
) -> EmailDocument {
    let mut chips = String::new();
    for (asset, value) in allocation.non_zero_entries() {
        writeln!(
            chips,
            "          <span style=\"display: inline-block; background: white; padding: 5px 10px; border-radius: 20px; margin: 3px; font-size: 12px;\">{} {}: {}%</span>",
            asset.emoji(),
            asset.label(),
            format_percent(value)
        )
        .expect("write portfolio chip");
    }

    let stats = &outcome.stats;
    let mut score_rows = String::new();
    for (label, value) in [
        ("⚔️ 攻撃力", stats.attack),
        ("🛡️ 防御力", stats.defense),
        ("💧 流動性", stats.liquidity),
        ("🔥 インフレ耐性", stats.inflation_resist),
    ] {
        writeln!(
            score_rows,
            "          <tr><td style=\"padding: 8px; font-size: 14px;\">{label}</td><td style=\"padding: 8px; font-size: 14px; font-weight: bold; text-align: right;\">{value}</td></tr>"
        )
        .expect("write score row");
    }

    let mut advice_blocks = String::new();
    for advice in &outcome.cleanup_advice {
        writeln!(
            advice_blocks,
            "        <div style=\"background: white; padding: 15px; border-radius: 8px; margin-bottom: 10px;\">\n          <div style=\"font-weight: bold; color: #4218BB; margin-bottom: 5px; font-size: 14px;\">{}</div>\n          <p style=\"color: #1c1e21; font-size: 14px; line-height: 1.5; margin: 0;\">{}</p>\n        </div>",
            escape_html(&advice.action),
            escape_html(&advice.description)
        )
        .expect("write advice block");
    }

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="ja">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>ポートフォリオ診断テスト 結果</title>
</head>
<body style="margin: 0; padding: 0; font-family: 'Hiragino Sans', 'Hiragino Kaku Gothic ProN', sans-serif; background-color: #f0f2f5;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
    <div style="background: linear-gradient(135deg, #00C0FF, #4218BB); padding: 30px; border-radius: 8px 8px 0 0; text-align: center;">
      <div style="font-size: 48px; margin-bottom: 10px;">📊</div>
      <h1 style="color: white; margin: 0; font-size: 24px;">あなたのポートフォリオ診断テスト</h1>
      <p style="color: rgba(255,255,255,0.9); margin: 10px 0 0 0; font-size: 14px;">診断結果レポート</p>
    </div>
    <div style="background: white; padding: 30px; border-radius: 0 0 8px 8px;">
      <p style="color: #1c1e21; font-size: 16px; margin-bottom: 20px;">
        {name} 様<br><br>
        この度はポートフォリオ診断テストをご利用いただき、誠にありがとうございます。<br>
        以下に診断結果をお送りいたします。
      </p>
      <div style="background: linear-gradient(135deg, #00C0FF, #4218BB); padding: 20px; border-radius: 8px; text-align: center; margin-bottom: 20px;">
        <div style="font-size: 48px; margin-bottom: 10px;">{emoji}</div>
        <h2 style="color: white; margin: 0; font-size: 20px;">{title}</h2>
      </div>
      <div style="background: #f0f2f5; padding: 20px; border-radius: 8px; margin-bottom: 20px;">
        <h3 style="color: #1c1e21; margin: 0 0 15px 0; font-size: 16px;">📊 あなたのポートフォリオ</h3>
        <p style="color: #65676b; margin: 0 0 10px 0; font-size: 14px;">総資産額: ¥{total}</p>
        <div>
{chips}        </div>
      </div>
      <div style="background: #f0f2f5; padding: 20px; border-radius: 8px; margin-bottom: 20px;">
        <h3 style="color: #1c1e21; margin: 0 0 15px 0; font-size: 16px;">📈 ポートフォリオスコア</h3>
        <table style="width: 100%; border-collapse: collapse;">
{score_rows}        </table>
      </div>
      <div style="background: #f0f2f5; padding: 20px; border-radius: 8px; margin-bottom: 20px;">
        <h3 style="color: #1c1e21; margin: 0 0 10px 0; font-size: 16px;">🔮 診断結果</h3>
        <p style="color: #1c1e21; font-size: 14px; line-height: 1.6; margin: 0;">{diagnosis}</p>
      </div>
      <div style="background: #e8eaf6; padding: 20px; border-radius: 8px; margin-bottom: 20px;">
        <h3 style="color: #1c1e21; margin: 0 0 10px 0; font-size: 16px;">📰 2026年ニュース予報</h3>
        <p style="color: #1c1e21; font-size: 14px; line-height: 1.6; margin: 0;">{news_forecast}</p>
      </div>
      <div style="background: #f0f2f5; padding: 20px; border-radius: 8px; margin-bottom: 20px;">
        <h3 style="color: #1c1e21; margin: 0 0 15px 0; font-size: 16px;">💡 2026年に向けたチェックポイント</h3>
{advice_blocks}      </div>
      <div style="background: #f0f2f5; padding: 15px; border-radius: 8px; text-align: center;">
        <p style="color: #65676b; font-size: 12px; margin: 0;">
          ⚠️ この診断はエンターテインメントコンテンツです。<br>
          投資判断は専門家にご相談の上、ご自身の責任で行ってください。
        </p>
      </div>
    </div>
    <div style="text-align: center; padding: 20px;">
      <p style="color: #65676b; font-size: 12px; margin: 0;">{copyright}</p>
    </div>
  </div>
</body>
</html>
"#,
        name = escape_html(&contact.name),
        emoji = escape_html(&outcome.emoji),
        title = escape_html(&outcome.title),
        total = format_yen(total_amount),
        chips = chips,
        score_rows = score_rows,
        diagnosis = escape_html(&outcome.diagnosis),
        news_forecast = escape_html(&outcome.news_forecast),
        advice_blocks = advice_blocks,
        copyright = escape_html(COPYRIGHT),
    );

    EmailDocument {
        subject: user_subject(outcome),
        body: EmailBody::Html(html),
    }
}

/// Lead notification for the internal recipients.
///
/// Text and HTML share the same field lines; `format` only decides how they are laid out.
pub fn render_admin_email(
    contact: &UserContact,
    breakdown: AdminBreakdown<'_>,
    outcome: &ReportedDiagnosis,
    submitted_at: DateTime<Utc>,
    format: AdminFormat,
) -> EmailDocument {
    let mut lines: Vec<(&'static str, String)> = vec![
        ("登録日時", format_jst(submitted_at)),
        ("フォーム名", FORM_NAME.to_string()),
        ("氏名", contact.name.clone()),
        ("電話番号", contact.phone.clone()),
        ("メールアドレス", contact.email.clone()),
        ("診断タイプ", format!("{} {}", outcome.emoji, outcome.title)),
    ];
    lines.extend(breakdown.lines());

    let body = match format {
        AdminFormat::Text => EmailBody::Text(
            lines
                .iter()
                .map(|(label, value)| format!("{label}：{value}"))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        AdminFormat::Html => {
            let mut html = String::from(
                "<!DOCTYPE html>\n<html lang=\"ja\">\n<head><meta charset=\"UTF-8\"></head>\n<body>\n<table style=\"border-collapse: collapse;\">\n",
            );
            for (label, value) in &lines {
                writeln!(
                    html,
                    "<tr><th style=\"text-align: left; padding: 4px 12px 4px 0;\">{}</th><td style=\"padding: 4px 0;\">{}</td></tr>",
                    escape_html(label),
                    escape_html(value)
                )
                .expect("write admin row");
            }
            html.push_str("</table>\n</body>\n</html>\n");
            EmailBody::Html(html)
        }
    };

    EmailDocument {
        subject: admin_subject(contact),
        body,
    }
}
