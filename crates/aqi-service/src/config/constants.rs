pub(super) const CONFIG_PATH_ENV: &str = "AIRRISK_CONFIG";

#[cfg(not(target_os = "windows"))]
pub(super) const CONFIG_CANDIDATES: [&str; 3] = [
    "/etc/airrisk/airrisk.toml",
    "./conf/airrisk.toml",
    "./airrisk.toml",
];

#[cfg(target_os = "windows")]
pub(super) const CONFIG_CANDIDATES: [&str; 3] = [
    r"C:\ProgramData\airrisk\airrisk.toml",
    r".\conf\airrisk.toml",
    r".\airrisk.toml",
];

pub(super) const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8501";
pub(super) const DEFAULT_ARTIFACT_DIR: &str = "./models";
