use async_trait::async_trait;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::ToolConfig;
use crate::downloader::errors::DownloadError;
use crate::downloader::traits::ToolMaintainer;
use crate::downloader::utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolType {
    YtDlp,
    Ffmpeg,
    Python,
}

impl ToolType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolType::YtDlp => "yt-dlp",
            ToolType::Ffmpeg => "ffmpeg",
            ToolType::Python => "python",
        }
    }

    fn version_arg(&self) -> &'static str {
        match self {
            ToolType::Ffmpeg => "-version", // ffmpeg uses a single dash
            ToolType::YtDlp | ToolType::Python => "--version",
        }
    }

    /// Pull the version number out of `--version` output
    pub fn parse_version(&self, output: &str) -> Option<String> {
        lazy_static::lazy_static! {
            static ref YTDLP_RE: Regex = Regex::new(r"\d{4}\.\d{2}\.\d{2}(?:\.\d+)?").unwrap();
            static ref FFMPEG_RE: Regex = Regex::new(r"ffmpeg version (\S+)").unwrap();
            static ref PYTHON_RE: Regex = Regex::new(r"Python (\d+\.\d+(?:\.\d+)?)").unwrap();
        }

        match self {
            ToolType::YtDlp => YTDLP_RE.find(output).map(|m| m.as_str().to_string()),
            ToolType::Ffmpeg => FFMPEG_RE
                .captures(output)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string()),
            ToolType::Python => PYTHON_RE
                .captures(output)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInfo {
    pub name: String,
    pub tool_type: ToolType,
    pub version: Option<String>,
    pub path: Option<PathBuf>,
    pub is_available: bool,
}

impl fmt::Display for ToolInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_available {
            return write!(f, "{}: not found", self.name);
        }
        let version = self.version.as_deref().unwrap_or("unknown version");
        match &self.path {
            Some(path) => write!(f, "{}: {} ({})", self.name, version, path.display()),
            None => write!(f, "{}: {}", self.name, version),
        }
    }
}

/// System package manager used for interpreter and ffmpeg bootstrap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Homebrew,
    Apt,
    Dnf,
    Pacman,
    Winget,
}

impl PackageManager {
    /// Probe order; the first one found wins
    pub const ALL: [PackageManager; 5] = [
        PackageManager::Homebrew,
        PackageManager::Apt,
        PackageManager::Dnf,
        PackageManager::Pacman,
        PackageManager::Winget,
    ];

    pub fn binary(&self) -> &'static str {
        match self {
            PackageManager::Homebrew => "brew",
            PackageManager::Apt => "apt-get",
            PackageManager::Dnf => "dnf",
            PackageManager::Pacman => "pacman",
            PackageManager::Winget => "winget",
        }
    }

    pub async fn detect() -> Option<Self> {
        let mut found = None;
        for pm in Self::ALL {
            if utils::locate(pm.binary()).await.is_some() {
                found = Some(pm);
                break;
            }
        }
        debug!(package_manager = ?found, "package manager detection");
        found
    }

    /// Command that installs the given tool, `None` for tools pip handles
    pub fn install_step(&self, tool: ToolType) -> Option<MaintenanceStep> {
        let label = format!("Install {} via {}", tool.as_str(), self.binary());
        let step = match (self, tool) {
            (_, ToolType::YtDlp) => return None,

            (PackageManager::Homebrew, ToolType::Python) => {
                MaintenanceStep::new(label, "brew", &["install", "python"])
            }
            (PackageManager::Homebrew, ToolType::Ffmpeg) => {
                MaintenanceStep::new(label, "brew", &["install", "ffmpeg"])
            }

            (PackageManager::Apt, ToolType::Python) => MaintenanceStep::new(
                label,
                "sudo",
                &["apt-get", "install", "-y", "python3", "python3-pip"],
            ),
            (PackageManager::Apt, ToolType::Ffmpeg) => {
                MaintenanceStep::new(label, "sudo", &["apt-get", "install", "-y", "ffmpeg"])
            }

            (PackageManager::Dnf, ToolType::Python) => MaintenanceStep::new(
                label,
                "sudo",
                &["dnf", "install", "-y", "python3", "python3-pip"],
            ),
            (PackageManager::Dnf, ToolType::Ffmpeg) => {
                MaintenanceStep::new(label, "sudo", &["dnf", "install", "-y", "ffmpeg"])
            }

            (PackageManager::Pacman, ToolType::Python) => MaintenanceStep::new(
                label,
                "sudo",
                &["pacman", "-S", "--noconfirm", "python", "python-pip"],
            ),
            (PackageManager::Pacman, ToolType::Ffmpeg) => {
                MaintenanceStep::new(label, "sudo", &["pacman", "-S", "--noconfirm", "ffmpeg"])
            }

            (PackageManager::Winget, ToolType::Python) => MaintenanceStep::new(
                label,
                "winget",
                &["install", "-e", "--id", "Python.Python.3.12"],
            ),
            (PackageManager::Winget, ToolType::Ffmpeg) => {
                MaintenanceStep::new(label, "winget", &["install", "-e", "--id", "Gyan.FFmpeg"])
            }
        };
        Some(step)
    }
}

/// One opaque subprocess call of an install or update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceStep {
    pub label: String,
    pub program: String,
    pub args: Vec<String>,
}

impl MaintenanceStep {
    pub fn new(label: impl Into<String>, program: &str, args: &[&str]) -> Self {
        Self {
            label: label.into(),
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn pip_install_ytdlp(python: &str) -> Self {
        Self::new(
            "Install yt-dlp via pip",
            python,
            &["-m", "pip", "install", "--upgrade", "yt-dlp"],
        )
    }
}

/// Planned work: run a command or explain why it is skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedStep {
    Run(MaintenanceStep),
    Skip { label: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    Passed,
    Failed(i32),
    Skipped(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub label: String,
    pub result: StepResult,
}

impl StepOutcome {
    pub fn passed(&self) -> bool {
        self.result == StepResult::Passed
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            StepResult::Passed => write!(f, "[ok]     {}", self.label),
            StepResult::Failed(code) => write!(f, "[failed] {} (exit code {})", self.label, code),
            StepResult::Skipped(reason) => write!(f, "[skipped] {}: {}", self.label, reason),
        }
    }
}

/// Steps for menu option 1, given what is already present
pub fn install_plan(
    config: &ToolConfig,
    python_available: bool,
    ffmpeg_available: bool,
    package_manager: Option<PackageManager>,
) -> Vec<PlannedStep> {
    let mut plan = Vec::new();

    if !python_available {
        plan.push(package_step(package_manager, ToolType::Python));
    }

    plan.push(PlannedStep::Run(MaintenanceStep::pip_install_ytdlp(
        &config.python_program,
    )));

    // yt-dlp needs ffmpeg to merge the H.264 and AAC streams
    if !ffmpeg_available {
        plan.push(package_step(package_manager, ToolType::Ffmpeg));
    }

    plan
}

fn package_step(package_manager: Option<PackageManager>, tool: ToolType) -> PlannedStep {
    match package_manager.and_then(|pm| pm.install_step(tool)) {
        Some(step) => PlannedStep::Run(step),
        None => PlannedStep::Skip {
            label: format!("Install {}", tool.as_str()),
            reason: format!(
                "no supported package manager found, please install {} manually",
                tool.as_str()
            ),
        },
    }
}

/// Steps for menu option 3. Errors if yt-dlp is not installed at all.
pub fn update_plan(
    config: &ToolConfig,
    ytdlp_path: Option<&Path>,
) -> Result<Vec<PlannedStep>, DownloadError> {
    let path = ytdlp_path.ok_or_else(|| DownloadError::NotInstalled("yt-dlp".to_string()))?;

    let step = if is_homebrew_path(path) {
        MaintenanceStep::new("Update yt-dlp via brew", "brew", &["upgrade", "yt-dlp"])
    } else {
        MaintenanceStep::new(
            "Update yt-dlp via pip",
            &config.python_program,
            &["-m", "pip", "install", "--upgrade", "yt-dlp"],
        )
    };

    Ok(vec![PlannedStep::Run(step)])
}

/// Whether a binary lives in a Homebrew prefix
pub fn is_homebrew_path(path: &Path) -> bool {
    path.starts_with("/opt/homebrew")
        || path.starts_with("/home/linuxbrew/.linuxbrew")
        || path.components().any(|c| c.as_os_str() == "Cellar")
}

pub struct ToolManager {
    config: ToolConfig,
}

impl ToolManager {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    pub async fn get_tool_info(&self, tool_type: ToolType) -> ToolInfo {
        let name = tool_type.as_str().to_string();
        let path = self.detect_tool(tool_type).await;
        let version = match &path {
            Some(p) => utils::capture_stdout(p, &[tool_type.version_arg()])
                .await
                .and_then(|out| tool_type.parse_version(&out)),
            None => None,
        };

        ToolInfo {
            name,
            tool_type,
            version,
            is_available: path.is_some(),
            path,
        }
    }

    pub async fn get_all_tools(&self) -> Vec<ToolInfo> {
        vec![
            self.get_tool_info(ToolType::YtDlp).await,
            self.get_tool_info(ToolType::Ffmpeg).await,
            self.get_tool_info(ToolType::Python).await,
        ]
    }

    async fn detect_tool(&self, tool_type: ToolType) -> Option<PathBuf> {
        let configured = match tool_type {
            ToolType::YtDlp => self.config.ytdlp_program.to_string_lossy().to_string(),
            ToolType::Ffmpeg => self.config.ffmpeg_program.clone(),
            ToolType::Python => self.config.python_program.clone(),
        };

        // An explicit path is taken as-is, bare names are searched for
        let as_path = Path::new(&configured);
        if as_path.components().count() > 1 {
            return as_path.is_file().then(|| as_path.to_path_buf());
        }
        utils::locate(&configured).await
    }

    async fn run_plan(&self, plan: Vec<PlannedStep>) -> Vec<StepOutcome> {
        let mut outcomes = Vec::with_capacity(plan.len());

        for planned in plan {
            let outcome = match planned {
                PlannedStep::Skip { label, reason } => {
                    warn!(step = %label, %reason, "skipping maintenance step");
                    StepOutcome {
                        label,
                        result: StepResult::Skipped(reason),
                    }
                }
                PlannedStep::Run(step) => {
                    info!(step = %step.label, program = %step.program, args = ?step.args, "running maintenance step");
                    // A failed step does not stop the rest of the plan
                    let result = match utils::run_inherited(Path::new(&step.program), &step.args).await {
                        Ok(r) if r.succeeded() => StepResult::Passed,
                        Ok(r) => StepResult::Failed(r.exit_code()),
                        Err(e) => {
                            warn!(step = %step.label, error = %e, "maintenance step could not start");
                            StepResult::Failed(-1)
                        }
                    };
                    StepOutcome {
                        label: step.label,
                        result,
                    }
                }
            };
            outcomes.push(outcome);
        }

        outcomes
    }
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new(ToolConfig::default())
    }
}

#[async_trait]
impl ToolMaintainer for ToolManager {
    async fn install_tools(&self) -> Vec<StepOutcome> {
        let python_available = self.detect_tool(ToolType::Python).await.is_some();
        let ffmpeg_available = self.detect_tool(ToolType::Ffmpeg).await.is_some();
        let package_manager = if python_available && ffmpeg_available {
            None
        } else {
            PackageManager::detect().await
        };

        let plan = install_plan(&self.config, python_available, ffmpeg_available, package_manager);
        self.run_plan(plan).await
    }

    async fn update_tool(&self) -> Result<Vec<StepOutcome>, DownloadError> {
        let path = self
            .detect_tool(ToolType::YtDlp)
            .await
            .map(|p| std::fs::canonicalize(&p).unwrap_or(p));
        let plan = update_plan(&self.config, path.as_deref())?;
        Ok(self.run_plan(plan).await)
    }

    async fn tools_status(&self) -> Vec<ToolInfo> {
        self.get_all_tools().await
    }
}
