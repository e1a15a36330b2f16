fn main() {
    println!("cargo:rerun-if-changed=athermo.json");
    export_espidf_env();
}

#[cfg(feature = "espidf")]
fn export_espidf_env() {
    // Host builds (tests, simulation) have no ESP-IDF environment to export.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }
}

#[cfg(not(feature = "espidf"))]
fn export_espidf_env() {}
