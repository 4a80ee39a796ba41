use dotted_conf::ConfigStore;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CollectorKargs {
    endpoint: String,
    batch_size: u32,
}

const BASE: &str = r#"{
    "monitors": {"cpu": {"interval": 5}, "disk": {"interval": 60}},
    "loggers": ["stdout"],
    "plugin": {
        "class": "collectors.Http",
        "kargs": {"endpoint": "http://@HOST@:@PORT@/ingest", "batch_size": 50}
    }
}"#;

const PLUGIN: &str = r#"{"plugin": {"kargs": {"batch_size": 200}}}"#;

fn main() -> Result<(), dotted_conf::ConfigError> {
    let store = ConfigStore::builder()
        .with_vars([("HOST", "localhost"), ("PORT", "9090")])
        .with_text(BASE)
        .with_plugin_text(PLUGIN)
        .build()?;

    println!("monitors: {}", store.monitors()?);
    println!("loggers: {}", store.loggers()?);
    println!("plugin class: {}", store.plugin_class()?);

    let kargs: CollectorKargs = store.plugin_kargs_as()?;
    println!("endpoint: {} (batch size {})", kargs.endpoint, kargs.batch_size);
    println!("cpu interval: {}", store.get("monitors.cpu.interval")?);

    Ok(())
}
