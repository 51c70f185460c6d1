use crate::common::*;

#[doc = "Line format for log files: `[timestamp] [LEVEL] [module:line] message`."]
fn custom_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "[{}] [{}] [{}:{}] {}",
        now.now().format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.module_path().unwrap_or("<unnamed>"),
        record.line().unwrap_or(0),
        record.args()
    )
}

#[doc = r#"
    Installs the global logger: daily rotated files under `logs/`, 10 files kept,
    with info and above mirrored to stderr. Stdout stays free for responses.

    The returned handle must live as long as the program, or buffered lines are lost.
"#]
pub fn set_global_logger() -> LoggerHandle {
    let log_directory: &str = "logs";

    Logger::try_with_env_or_str("info")
        .and_then(|logger| {
            logger
                .log_to_file(FileSpec::default().directory(log_directory).discriminant("makechart"))
                .rotate(
                    Criterion::Age(Age::Day),
                    Naming::Timestamps,
                    Cleanup::KeepLogFiles(10),
                )
                .format_for_files(custom_format)
                .duplicate_to_stderr(Duplicate::Info)
                .start()
        })
        .unwrap_or_else(|e| panic!("[set_global_logger] Logger initialization failed: {:?}", e))
}
