use std::env;
use std::fs;
use std::path::Path;

// 从 .env 加载构建期配置（后端源站等），转发给 rustc。
// 没有 .env 时使用 config.rs 中的默认值。
fn main() {
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim();

                    // 环境里已有的变量优先
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    } else {
        println!(
            "cargo:warning=No .env file found, using default backend origin. \
             Set CLASSDESK_API_BASE / CLASSDESK_ASSET_ORIGIN to override."
        );
    }

    println!("cargo:rerun-if-changed=build.rs");
}
