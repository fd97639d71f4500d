// 命令行边界测试：直接运行编译好的二进制，检查退出码与输出
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba};

fn unique_temp_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock error")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("ico-converter-cli-{tag}-{nanos}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_png(path: &Path, side: u32) {
    let img = ImageBuffer::from_fn(side, side, |x, y| Rgba([x as u8, y as u8, 77, 255]));
    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut cursor, ImageFormat::Png)
        .expect("failed to encode test image");
    fs::write(path, cursor.into_inner()).expect("write png");
}

fn run_binary(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ico-converter"))
        .args(args)
        .env_remove("ICO_CONVERTER_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn ico-converter")
}

#[test]
fn success_prints_exactly_one_line_and_exits_zero() {
    let dir = unique_temp_dir("ok");
    let source = dir.join("icon_1024.png");
    let destination = dir.join("icon.ico");
    write_png(&source, 1024);

    let output = run_binary(&[&source, &destination]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    assert_eq!(
        stdout,
        format!(
            "Successfully converted {} to {}\n",
            source.display(),
            destination.display()
        )
    );
    assert!(destination.exists());
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn wrong_argument_count_exits_two() {
    let dir = unique_temp_dir("usage");
    let only_one = dir.join("icon.png");

    for args in [vec![], vec![only_one.as_path()], vec![only_one.as_path(), only_one.as_path(), only_one.as_path()]] {
        let output = run_binary(&args);
        assert_eq!(output.status.code(), Some(2));
        assert!(output.stdout.is_empty());
        assert!(!output.stderr.is_empty());
    }
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn failed_conversion_exits_one_with_message_on_stderr() {
    let dir = unique_temp_dir("fail");
    let destination = dir.join("icon.ico");

    let output = run_binary(&[&dir.join("missing.png"), &destination]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing.png"), "stderr: {stderr}");
    assert!(!destination.exists());
    let _ = fs::remove_dir_all(dir);
}
