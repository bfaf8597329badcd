//! Latinify - 우즈베크어 라틴↔키릴 변환 도구

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use std::time::SystemTime;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde_json::json;

use latinify::ads::{next_ad_for, AdSettings, AdStore, NewAdvertisement, SessionTracker};
use latinify::config::{config_path, load_config, load_config_from, save_config, LatinifyConfig};
use latinify::document::read_document;
use latinify::storage::{ConversionLog, ConversionRecord, Janitor, UploadStore};
use latinify::worker::ConversionPool;
use latinify::{convert, to_cyrillic, to_latin, Direction, RequestedDirection};

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// 통계에 보여줄 최근 변환 수
const RECENT_CONVERSIONS: usize = 10;

#[derive(Parser, Debug)]
#[command(name = "latinify", version, about = "O'zbek lotin ↔ kirill konvertori")]
struct Cli {
    /// Load configuration from a specific file
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    config_file: Option<PathBuf>,

    /// Increase logging verbosity (repeat for more detail)
    #[arg(short = 'v', action = ArgAction::Count, global = true)]
    verbosity: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a piece of text
    Text {
        text: String,
        /// Target script
        #[arg(long, value_enum, default_value_t = Target::Auto)]
        to: Target,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert DOCX files on the worker pool
    Docx {
        #[arg(required = true, value_name = "INPUT")]
        inputs: Vec<PathBuf>,
        #[arg(long, default_value = "auto")]
        direction: RequestedDirection,
        /// Directory for converted files (defaults to each input's directory)
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
    /// Show each paragraph of a DOCX next to its conversion
    Preview {
        input: PathBuf,
        #[arg(long, default_value = "auto")]
        direction: RequestedDirection,
    },
    /// Store a DOCX in the upload directory and convert it
    Upload {
        file: PathBuf,
        #[arg(long, default_value = "auto")]
        direction: RequestedDirection,
    },
    /// Copy a converted upload out of the upload directory
    Download { id: String, dest: PathBuf },
    /// Remove expired uploads
    Janitor {
        /// Sweep once and exit
        #[arg(long)]
        once: bool,
    },
    /// Manage advertisements
    #[command(subcommand)]
    Ads(AdsCommand),
    /// Print the effective configuration
    Config {
        /// Write it to the configuration file
        #[arg(long)]
        init: bool,
    },
}

#[derive(Subcommand, Debug)]
enum AdsCommand {
    /// List advertisements, newest first
    List,
    /// Create an advertisement
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: String,
        #[arg(long, value_name = "FILE")]
        image: PathBuf,
        #[arg(long, default_value_t = 5)]
        delay: u32,
        /// Create the advertisement switched off
        #[arg(long)]
        inactive: bool,
    },
    /// Flip an advertisement on or off
    Toggle { id: u64 },
    /// Delete an advertisement and its image
    Remove { id: u64 },
    /// Show or change global settings
    Settings {
        #[arg(long)]
        enabled: Option<bool>,
        #[arg(long)]
        delay: Option<u32>,
    },
    /// Pick the next advertisement for a session
    Next {
        #[arg(long)]
        session: Option<String>,
    },
    /// Advertisement and conversion statistics
    Stats,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Target {
    Auto,
    Cyrillic,
    Latin,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // 로깅 초기화 (기본은 warn, -v 마다 한 단계씩)
    let default_level = match cli.verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = match &cli.config_file {
        Some(path) => load_config_from(path),
        None => load_config(),
    };

    match run(cli.command, &config, cli.config_file.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Xatolik: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &LatinifyConfig, config_file: Option<&Path>) -> CliResult {
    match command {
        Command::Text { text, to, json } => convert_text(config, &text, to, json),
        Command::Docx {
            inputs,
            direction,
            out_dir,
        } => convert_files(config, &inputs, direction, out_dir.as_deref()),
        Command::Preview { input, direction } => preview(&input, direction),
        Command::Upload { file, direction } => upload(config, &file, direction),
        Command::Download { id, dest } => download(config, &id, &dest),
        Command::Janitor { once } => janitor(config, once),
        Command::Ads(command) => ads(config, command),
        Command::Config { init } => show_config(config, config_file, init),
    }
}

/// 변환 기록 추가 (실패해도 변환 결과에는 영향 없음)
fn record_conversion(config: &LatinifyConfig, record: ConversionRecord) {
    if !config.conversion_logging {
        return;
    }
    let history = ConversionLog::new(config.conversion_log_path());
    if let Err(e) = history.record(&record) {
        log::warn!("변환 기록 실패 {}: {}", history.path().display(), e);
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn convert_text(config: &LatinifyConfig, text: &str, to: Target, as_json: bool) -> CliResult {
    let (result, direction) = match to {
        Target::Auto => convert(text),
        Target::Cyrillic => (to_cyrillic(text), Direction::LatinToCyrillic),
        Target::Latin => (to_latin(text), Direction::CyrillicToLatin),
    };
    let length = text.chars().count();
    log::debug!("텍스트 변환: {} 글자, {}", length, direction);
    record_conversion(config, ConversionRecord::text(length));

    if as_json {
        let body = json!({ "success": true, "result": result, "direction": direction });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("{}", result);
    }
    Ok(())
}

fn convert_files(
    config: &LatinifyConfig,
    inputs: &[PathBuf],
    direction: RequestedDirection,
    out_dir: Option<&Path>,
) -> CliResult {
    if let Some(dir) = out_dir {
        fs::create_dir_all(dir)?;
    }

    let pool = ConversionPool::new(config.worker_threads);
    log::info!("워커 {}개로 파일 {}개 변환", pool.size(), inputs.len());
    let jobs: Vec<_> = inputs
        .iter()
        .map(|input| {
            let output = converted_name(input, out_dir);
            let rx = pool.submit(input.clone(), output.clone(), direction);
            (input, output, rx)
        })
        .collect();

    let mut failures = 0;
    for (input, output, rx) in jobs {
        match rx.recv() {
            Ok(Ok(result)) => {
                println!(
                    "{} -> {} ({}/{} paragraf)",
                    input.display(),
                    output.display(),
                    result.converted,
                    result.paragraphs
                );
                record_conversion(config, ConversionRecord::docx(file_name(input)));
            }
            Ok(Err(e)) => {
                eprintln!("{}: {}", input.display(), e);
                failures += 1;
            }
            Err(_) => {
                eprintln!("{}: Server xatosi", input.display());
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(format!("{} ta fayl konvertatsiya qilinmadi", failures).into());
    }
    Ok(())
}

/// `hujjat.docx` → `converted_hujjat.docx`
fn converted_name(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".into());
    let dir = out_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(format!("converted_{}.docx", stem))
}

/// 문단별 원문과 변환 결과 출력 (파일은 쓰지 않음)
fn preview(input: &Path, direction: RequestedDirection) -> CliResult {
    let document = read_document(&fs::read(input)?)?;
    for (index, text) in document.texts().iter().enumerate() {
        if text.trim().is_empty() {
            continue;
        }
        println!("{:>4}: {}", index + 1, text);
        println!("   => {}", direction.apply(text));
    }
    Ok(())
}

fn upload(config: &LatinifyConfig, file: &Path, direction: RequestedDirection) -> CliResult {
    let store = UploadStore::new(&config.upload_dir, config.max_upload_bytes)?;
    let bytes = fs::read(file)?;
    let filename = file_name(file);

    let uploaded = store.save_upload(&bytes, &filename)?;
    let output = store.converted_path(&uploaded.id);
    let _guard = match store.begin(&[uploaded.path.as_path(), output.as_path()]) {
        Ok(guard) => guard,
        Err(e) => {
            store.remove(&uploaded.path);
            return Err(e.into());
        }
    };

    let pool = ConversionPool::new(1);
    let result = match pool.submit(uploaded.path.clone(), output, direction).recv() {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            store.remove(&uploaded.path);
            return Err(e.into());
        }
        Err(_) => {
            store.remove(&uploaded.path);
            return Err("Server xatosi".into());
        }
    };

    record_conversion(config, ConversionRecord::docx(filename));

    let body = json!({
        "success": true,
        "file_id": uploaded.id,
        "download_url": format!("/api/download/{}", uploaded.id),
        "paragraphs": result.paragraphs,
        "converted": result.converted,
    });
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

fn download(config: &LatinifyConfig, id: &str, dest: &Path) -> CliResult {
    let store = UploadStore::new(&config.upload_dir, config.max_upload_bytes)?;
    let path = store.find_converted(id)?;
    fs::copy(&path, dest)?;
    println!("{}", dest.display());
    Ok(())
}

fn janitor(config: &LatinifyConfig, once: bool) -> CliResult {
    let store = UploadStore::new(&config.upload_dir, config.max_upload_bytes)?;
    let janitor = Janitor::new(store.dir(), config.cleanup_max_age());

    if once {
        let report = janitor.sweep(SystemTime::now());
        println!("{} ta fayl o'chirildi", report.removed.len());
        return Ok(());
    }

    log::info!(
        "정리 작업 시작: {} ({}초 주기)",
        store.dir().display(),
        config.cleanup_interval().as_secs()
    );
    let _handle = janitor.spawn(config.cleanup_interval())?;
    loop {
        thread::park();
    }
}

fn ads(config: &LatinifyConfig, command: AdsCommand) -> CliResult {
    let mut store = AdStore::open(
        config.ads_store_path(),
        config.ads_image_dir(),
        config.max_image_bytes,
    )?;

    match command {
        AdsCommand::List => {
            println!("{}", serde_json::to_string_pretty(&json!({ "ads": store.list() }))?);
        }
        AdsCommand::Add {
            title,
            url,
            image,
            delay,
            inactive,
        } => {
            let bytes = fs::read(&image)?;
            let name = file_name(&image);
            let new = NewAdvertisement {
                display_delay_seconds: delay,
                active: !inactive,
                ..NewAdvertisement::new(title, url)
            };
            let ad = store.create(new, &bytes, &name)?;
            println!("{}", serde_json::to_string_pretty(&json!({ "success": true, "ad": ad }))?);
        }
        AdsCommand::Toggle { id } => {
            let active = store.toggle(id)?;
            let body = json!({ "success": true, "active": active, "ad": store.get(id) });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        AdsCommand::Remove { id } => {
            store.delete(id)?;
            println!("{}", json!({ "success": true }));
        }
        AdsCommand::Settings { enabled, delay } => {
            if enabled.is_some() || delay.is_some() {
                let current = store.settings();
                store.update_settings(AdSettings {
                    ads_enabled: enabled.unwrap_or(current.ads_enabled),
                    modal_delay_seconds: delay.unwrap_or(current.modal_delay_seconds),
                })?;
            }
            let body = json!({ "settings": store.settings(), "stats": store.stats() });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        AdsCommand::Next { session } => {
            let path = config.sessions_path();
            let tracker = SessionTracker::load(&path, config.session_ttl())?;
            tracker.evict_expired(SystemTime::now());

            let session = tracker.open(session.as_deref());
            let ad = next_ad_for(&session, &store, &tracker);
            tracker.save(&path)?;
            log::debug!("세션 {}개 기록 중", tracker.session_count());

            let body = json!({ "session_id": session, "ad": ad });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        AdsCommand::Stats => {
            let body = stats_report(config, &store)?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }
    Ok(())
}

/// 광고 통계와 최근 변환 기록
fn stats_report(
    config: &LatinifyConfig,
    store: &AdStore,
) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let ads = store.stats();
    let conversions = ConversionLog::new(config.conversion_log_path()).stats(RECENT_CONVERSIONS)?;
    Ok(json!({
        "stats": {
            "total_ads": ads.total_ads,
            "active_ads": ads.active_ads,
            "total_conversions": conversions.total_conversions,
        },
        "recent_conversions": conversions.recent_conversions,
    }))
}

/// 현재 설정 출력, `--init` 이면 설정 파일로 저장
fn show_config(config: &LatinifyConfig, config_file: Option<&Path>, init: bool) -> CliResult {
    if init {
        let path = config_file.map(Path::to_path_buf).unwrap_or_else(config_path);
        save_config(config, &path)?;
        log::info!("설정 파일 저장: {}", path.display());
    }
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
