//! 매매일지 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 요약 지표
//! journal metrics --trades trades.json --starting-balance 10000
//!
//! # 2월 이후 SPY 거래만 대시보드로
//! journal dashboard --trades trades.json --symbol SPY --from 2024-02-01
//!
//! # 특정 날짜 시작 시점 잔고
//! journal balance-at --trades trades.json --date 2024-03-01
//!
//! # 설정 파일 지정 (시작 잔고, 계약 승수, 로깅)
//! journal --config journal.toml compare --trades trades.json --tag 3
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use journal_cli::{load_trades, render, FilterOptions, Report};
use journal_core::{init_logging, AppConfig, DateInput, LogConfig, TagId};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "journal")]
#[command(about = "Trading journal CLI - 매매일지 분석 도구", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// 모든 명령에 공통인 입력과 필터 인자
#[derive(Args, Debug)]
struct InputArgs {
    /// 거래 내보내기 파일 (JSON 배열 또는 ID → 거래 객체)
    #[arg(long)]
    trades: PathBuf,

    /// 시작 잔고 (기본: 설정의 journal.starting_balance)
    #[arg(long)]
    starting_balance: Option<Decimal>,

    /// 태그 ID (여러 번 지정 가능, 하나라도 일치하면 포함)
    #[arg(long = "tag")]
    tags: Vec<TagId>,

    /// 종목 심볼
    #[arg(long)]
    symbol: Option<String>,

    /// 포지션 종류 (CALL, PUT)
    #[arg(long)]
    position: Option<String>,

    /// 청산일 하한 (포함)
    #[arg(short = 'f', long)]
    from: Option<String>,

    /// 청산일 상한 (포함)
    #[arg(short, long)]
    to: Option<String>,
}

impl InputArgs {
    fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            tags: self.tags.clone(),
            symbol: self.symbol.clone(),
            position: self.position.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// 요약 지표 (승률, 평균 수익/손실, 잔고)
    Metrics(InputArgs),

    /// 누적 손익 곡선
    Cumulative(InputArgs),

    /// 계좌 잔고 곡선
    Balance(InputArgs),

    /// 월별 순손익
    Monthly(InputArgs),

    /// 최근 30일 일별 순손익
    Last30(InputArgs),

    /// 특정 날짜 시작 시점의 잔고
    BalanceAt {
        #[command(flatten)]
        input: InputArgs,

        /// 기준 날짜 (당일 청산 거래는 제외)
        #[arg(short, long)]
        date: String,
    },

    /// 현재/이전 배치 거래 목록
    Batches(InputArgs),

    /// 최근 배치 vs 이전 배치 비교
    Compare(InputArgs),

    /// 대시보드 전체
    Dashboard(InputArgs),
}

impl Commands {
    fn into_parts(self) -> (Report, InputArgs) {
        match self {
            Commands::Metrics(input) => (Report::Metrics, input),
            Commands::Cumulative(input) => (Report::Cumulative, input),
            Commands::Balance(input) => (Report::Balance, input),
            Commands::Monthly(input) => (Report::Monthly, input),
            Commands::Last30(input) => (Report::Last30, input),
            Commands::BalanceAt { input, date } => {
                (Report::BalanceAt(DateInput::from(date)), input)
            }
            Commands::Batches(input) => (Report::Batches, input),
            Commands::Compare(input) => (Report::Compare, input),
            Commands::Dashboard(input) => (Report::Dashboard, input),
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("설정 로드 실패")?;
    init_logging(LogConfig::from_env_over(&config.logging))
        .map_err(|e| anyhow!("로깅 초기화 실패: {}", e))?;

    let (report, input) = cli.command.into_parts();
    let filter = input.filter_options().into_filter()?;
    let starting_balance = input
        .starting_balance
        .unwrap_or(config.journal.starting_balance);

    let trades = load_trades(&input.trades, config.journal.contract_multiplier)
        .with_context(|| format!("거래 파일 로드 실패: {}", input.trades.display()))?;

    info!(?report, trades = trades.len(), %starting_balance, "리포트 생성");

    let output = render(&report, &trades, starting_balance, &filter)?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_dashboard_with_filters() {
        let cli = Cli::try_parse_from([
            "journal",
            "dashboard",
            "--trades",
            "trades.json",
            "--starting-balance",
            "2500.50",
            "--tag",
            "3",
            "--tag",
            "7",
            "--symbol",
            "SPY",
            "--from",
            "2024-02-01",
        ])
        .unwrap();

        let (report, input) = cli.command.into_parts();

        assert_eq!(report, Report::Dashboard);
        assert_eq!(input.starting_balance, Some(dec!(2500.50)));
        assert_eq!(input.tags, vec![3, 7]);
        assert_eq!(input.symbol.as_deref(), Some("SPY"));
        assert_eq!(input.from.as_deref(), Some("2024-02-01"));
    }

    #[test]
    fn test_parse_balance_at_with_global_config() {
        let cli = Cli::try_parse_from([
            "journal",
            "balance-at",
            "--trades",
            "t.json",
            "--date",
            "2024-03-01",
            "--config",
            "journal.toml",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("journal.toml")));

        let (report, _) = cli.command.into_parts();
        assert_eq!(report, Report::BalanceAt(DateInput::from("2024-03-01")));
    }

    #[test]
    fn test_trades_flag_is_required() {
        assert!(Cli::try_parse_from(["journal", "metrics"]).is_err());
    }
}
