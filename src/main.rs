use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use condenser_design::config::{self, DEFAULT_CONFIG_PATH};
use condenser_design::error::AppError;
use condenser_design::pipeline;
use condenser_design::record::DesignInput;
use condenser_design::report;

#[derive(Parser)]
#[command(name = "condenser_design")]
#[command(about = "표면식 복수기 열수력 설계 계산기", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 설계 입력 파일(TOML)로 계산한다
    Run {
        /// 설계 입력 파일 경로
        record: PathBuf,
        /// 설정 파일 경로(없으면 기본값으로 생성)
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
        /// 결과를 TOML로 저장할 경로
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// 검증 실패 시 오류 코드로 종료
        #[arg(long)]
        strict: bool,
    },
    /// 재질 카탈로그를 출력한다
    Materials,
    /// 설계 입력 예시 파일을 출력한다
    Template,
}

/// 프로그램의 엔트리 포인트.
fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if let Err(err) = try_run(cli.command) {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run(command: Commands) -> Result<(), AppError> {
    match command {
        Commands::Run {
            record,
            config,
            output,
            strict,
        } => cmd_run(&record, &config, output.as_deref(), strict),
        Commands::Materials => {
            print!("{}", report::render_materials());
            Ok(())
        }
        Commands::Template => {
            print!("{}", toml::to_string_pretty(&DesignInput::template())?);
            Ok(())
        }
    }
}

fn cmd_run(
    record_path: &Path,
    config_path: &Path,
    output: Option<&Path>,
    strict: bool,
) -> Result<(), AppError> {
    let cfg = config::load_or_default(config_path)?;
    let input = DesignInput::load(record_path)?;
    let result = pipeline::run(&input, &cfg);

    print!("{}", report::render(&result));
    if let Some(path) = output {
        fs::write(path, report::to_toml(&result)?)?;
        println!("\n결과 저장: {}", path.display());
    }
    if strict {
        result.into_result()?;
    }
    Ok(())
}
