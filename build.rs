fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 未設定 PROTOC 時使用內建的 protoc
    if std::env::var_os("PROTOC").is_none() {
        std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }

    println!("cargo:rerun-if-changed=proto/food_rush.proto");
    tonic_build::compile_protos("proto/food_rush.proto")?;
    Ok(())
}
