use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use futures::executor::block_on;
use pricechart_core::page::{MemoryPage, RecordingCharts};
use pricechart_core::{LoadError, PageConfig, PageConfigOverrides, PricePayload, PricePoint};
use pricechart_payload::{embed_payload, encode_payload};
use pricechart_ui::{load_timeline, ChartModuleLoader, LoadOutcome, RenderOutcome};

#[derive(Parser, Debug)]
#[command(
    name = "pricechart-cli",
    about = "Xem trước biểu đồ giá và tạo payload nhúng cho trang sản phẩm."
)]
struct Args {
    /// File JSON ghi đè một phần cấu hình trang.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// In cấu hình Chart.js dựng từ text payload.
    Preview {
        /// File chứa text payload như trong element trang.
        #[arg(short, long)]
        input: PathBuf,
        /// Path trang giả lập.
        #[arg(long, default_value = "/products/preview")]
        path: String,
    },
    /// Tạo text payload từ danh sách điểm giá JSON.
    Embed {
        /// File JSON dạng `[{"recorded_at": "...", "price": 12.5}]`.
        #[arg(short, long)]
        input: PathBuf,
        /// Chỉ mã hóa một lớp JSON.
        #[arg(long)]
        plain: bool,
    },
}

/// Thư viện biểu đồ đã có sẵn trong tiến trình.
struct Preloaded(Rc<RecordingCharts>);

impl ChartModuleLoader<MemoryPage> for Preloaded {
    type Library = Rc<RecordingCharts>;

    async fn load(&self) -> Result<Rc<RecordingCharts>, LoadError> {
        Ok(Rc::clone(&self.0))
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Preview { input, path } => preview(&input, path, &config),
        Command::Embed { input, plain } => embed(&input, plain),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<PageConfig> {
    let Some(path) = path else {
        return Ok(PageConfig::default());
    };
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Không đọc được file config {path:?}"))?;
    let overrides: PageConfigOverrides =
        serde_json::from_str(&data).with_context(|| format!("Config không hợp lệ {path:?}"))?;
    Ok(PageConfig::from(overrides))
}

fn preview(input: &Path, path: String, config: &PageConfig) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Không đọc được file {input:?}"))?;

    let page = MemoryPage::new(path)
        .with_text(&config.payload_element_id, text.trim_end())
        .with_element(&config.chart_element_id);
    let charts = Rc::new(RecordingCharts::default());

    match block_on(load_timeline(&page, &Preloaded(Rc::clone(&charts)), config)) {
        LoadOutcome::Rendered(RenderOutcome::Mounted) => {}
        LoadOutcome::Skipped => bail!("Path không phải trang sản phẩm, biểu đồ không được tải"),
        outcome => bail!("Không vẽ được biểu đồ: {outcome:?}"),
    }

    for (_, chart) in charts.mounted() {
        println!("{}", serde_json::to_string_pretty(&chart)?);
    }
    Ok(())
}

fn embed(input: &Path, plain: bool) -> anyhow::Result<()> {
    let data = std::fs::read_to_string(input)
        .with_context(|| format!("Không đọc được file {input:?}"))?;
    let points: Vec<PricePoint> =
        serde_json::from_str(&data).context("Danh sách điểm giá không hợp lệ")?;

    let payload = PricePayload::from_points(points);
    let text = if plain {
        encode_payload(&payload)?
    } else {
        embed_payload(&payload)?
    };
    println!("{text}");
    Ok(())
}
