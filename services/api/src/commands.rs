use crate::infra::{parse_admin_format, parse_breakdown};
use chrono::Utc;
use clap::Args;
use portfolio_diagnosis::config::AppConfig;
use portfolio_diagnosis::error::AppError;
use portfolio_diagnosis::telemetry;
use portfolio_diagnosis::workflows::quiz::notification::format::{format_percent, format_yen};
use portfolio_diagnosis::workflows::quiz::notification::{
    render_admin_email, render_user_email, AdminBreakdown, AdminFormat, BreakdownKind,
    ConfiguredTransport, EmailRequest, NotificationService, NotificationSettings,
};
use portfolio_diagnosis::workflows::quiz::{
    DiagnosisEngine, DiagnosisResult, PortfolioAllocation, PortfolioSubmission, ResultQuery,
    ResultView, UserContact,
};
use std::sync::Arc;

/// Yen amounts per asset class; omitted assets count as zero.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct AmountArgs {
    /// Stocks (yen)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) stocks: f64,
    /// Real estate (yen)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) real_estate: f64,
    /// Gold (yen)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) gold: f64,
    /// Mutual funds and ETFs (yen)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) mutual_funds: f64,
    /// Crypto assets (yen)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) crypto: f64,
    /// Cash and deposits (yen)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) cash: f64,
    /// Anything else (yen)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) other: f64,
}

impl AmountArgs {
    pub(crate) fn allocation(&self) -> PortfolioAllocation {
        PortfolioAllocation {
            stocks: self.stocks,
            real_estate: self.real_estate,
            gold: self.gold,
            mutual_funds: self.mutual_funds,
            crypto: self.crypto,
            cash: self.cash,
            other: self.other,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct DiagnoseArgs {
    #[command(flatten)]
    pub(crate) amounts: AmountArgs,
    /// Print the result view as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct PreviewEmailArgs {
    /// Recipient name
    #[arg(long)]
    pub(crate) name: String,
    /// Recipient phone number (digits and hyphens)
    #[arg(long)]
    pub(crate) phone: String,
    /// Recipient e-mail address
    #[arg(long)]
    pub(crate) email: String,
    #[command(flatten)]
    pub(crate) amounts: AmountArgs,
    /// Print the admin notification instead of the user report
    #[arg(long)]
    pub(crate) admin: bool,
    /// Admin notification format (text or html)
    #[arg(long, value_parser = parse_admin_format, default_value = "text")]
    pub(crate) admin_format: AdminFormat,
    /// Figures listed in the admin notification (amounts or percentages)
    #[arg(long, value_parser = parse_breakdown, default_value = "amounts")]
    pub(crate) breakdown: BreakdownKind,
    /// Deliver both mails through the configured transport instead of printing
    #[arg(long)]
    pub(crate) send: bool,
}

pub(crate) fn run_diagnose(args: DiagnoseArgs) -> Result<(), AppError> {
    let amounts = args.amounts.allocation();
    let query = ResultQuery {
        percentages: amounts.to_percentages(),
        amounts,
        contact: UserContact::default(),
        total_amount: amounts.total(),
    };
    let view = ResultView::build(&DiagnosisEngine::default(), &query);

    if args.json {
        match serde_json::to_string_pretty(&view) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Result view unavailable: {err}"),
        }
        return Ok(());
    }

    match view {
        ResultView::Empty { message, hint, .. } => {
            println!("{message}");
            println!("{hint}");
        }
        ResultView::Diagnosed {
            total_amount,
            breakdown,
            diagnosis,
            ..
        } => {
            println!("Portfolio diagnosis");
            println!("Total assets: ¥{}", format_yen(total_amount));
            println!("\nAllocation");
            for entry in breakdown {
                println!(
                    "  {} {}: {}% (¥{})",
                    entry.emoji,
                    entry.label,
                    format_percent(entry.percentage),
                    format_yen(entry.amount)
                );
            }
            render_diagnosis(&diagnosis);
        }
    }

    Ok(())
}

fn render_diagnosis(diagnosis: &DiagnosisResult) {
    println!(
        "\nResult: {} {} ({})",
        diagnosis.emoji,
        diagnosis.title,
        diagnosis.kind.tag()
    );
    println!("Condition: {}", diagnosis.condition);
    println!(
        "Scores: attack {} / defense {} / liquidity {} / inflation resistance {}",
        diagnosis.stats.attack,
        diagnosis.stats.defense,
        diagnosis.stats.liquidity,
        diagnosis.stats.inflation_resist
    );
    println!("\n{}", diagnosis.diagnosis);
    println!("\nNews forecast: {}", diagnosis.news_forecast);
    println!("\nCheckpoints");
    for advice in &diagnosis.cleanup_advice {
        println!("  - {}: {}", advice.action, advice.description);
    }
}

pub(crate) async fn run_preview_email(args: PreviewEmailArgs) -> Result<(), AppError> {
    let submission = PortfolioSubmission {
        contact: UserContact {
            name: args.name,
            phone: args.phone,
            email: args.email,
        },
        amounts: args.amounts.allocation(),
    };

    let link = match submission.accept() {
        Ok(link) => link,
        Err(errors) => {
            println!("Submission rejected");
            for (field, message) in errors.field_messages() {
                println!("  {field}: {message}");
            }
            return Err(errors.into());
        }
    };

    let diagnosis = DiagnosisEngine::default().diagnose(&link.percentages);
    let request = EmailRequest::from_diagnosis(submission.contact, submission.amounts, &diagnosis);
    let settings = NotificationSettings {
        admin_format: args.admin_format,
        admin_breakdown: args.breakdown,
    };

    if args.send {
        let config = AppConfig::load()?;
        telemetry::init(&config.telemetry)?;

        let transport = Arc::new(ConfiguredTransport::from_config(&config.mail)?);
        let service =
            NotificationService::with_settings(transport, settings, config.mail.diagnostics());
        let receipt = service.deliver(&request, Utc::now()).await?;

        println!("Result mail sent to {}", receipt.user_recipient);
        println!(
            "Admin notification sent to {}",
            receipt.admin_recipients.join(", ")
        );
        return Ok(());
    }

    let document = if args.admin {
        render_admin_email(
            &request.user_info,
            AdminBreakdown::select(
                settings.admin_breakdown,
                &request.amounts,
                &request.portfolio,
            ),
            &request.diagnosis_result,
            Utc::now(),
            settings.admin_format,
        )
    } else {
        render_user_email(
            &request.user_info,
            &request.portfolio,
            request.total_amount,
            &request.diagnosis_result,
        )
    };

    println!("Subject: {}\n", document.subject);
    println!("{}", document.body.as_str());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_flags_map_onto_allocation() {
        let args = AmountArgs {
            stocks: 600_000.0,
            cash: 400_000.0,
            ..AmountArgs::default()
        };

        let allocation = args.allocation();
        assert_eq!(allocation.total(), 1_000_000.0);
        assert_eq!(allocation.to_percentages().stocks, 60.0);
    }

    #[test]
    fn diagnose_accepts_empty_portfolio() {
        let result = run_diagnose(DiagnoseArgs::default());
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn preview_rejects_invalid_contact() {
        let args = PreviewEmailArgs {
            name: "山田太郎".to_string(),
            phone: "not a phone".to_string(),
            email: "taro@example.com".to_string(),
            amounts: AmountArgs {
                stocks: 100.0,
                ..AmountArgs::default()
            },
            admin: false,
            admin_format: AdminFormat::Text,
            breakdown: BreakdownKind::Amounts,
            send: false,
        };

        let error = run_preview_email(args).await.expect_err("contact rejected");
        assert!(matches!(error, AppError::Intake(_)));
    }
}
