// 属性测试：任意源尺寸 + 任意尺寸子集，ICO 目录项都与请求尺寸完全一致
use std::io::Cursor;

use ico_converter::{ConvertConfig, IcoConverter, IconSize};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba};
use proptest::prelude::*;

fn png_bytes(width: u32, height: u32, seed: u8) -> Vec<u8> {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgba([seed, (x % 256) as u8, (y % 256) as u8, 255 - seed])
    });
    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut cursor, ImageFormat::Png)
        .expect("failed to encode test image");
    cursor.into_inner()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn every_entry_matches_requested_size(
        width in 1u32..96,
        height in 1u32..96,
        seed in any::<u8>(),
        sides in proptest::sample::subsequence(vec![256u32, 128, 64, 48, 32, 24, 16], 1..=7),
    ) {
        let config = ConvertConfig {
            sizes: sides.iter().copied().map(IconSize::square).collect(),
            ..Default::default()
        };
        let converter = IcoConverter::new(config).expect("converter init failed");

        let ico_bytes = converter
            .convert_bytes(&png_bytes(width, height, seed))
            .expect("in-memory conversion should succeed");

        let dir = ico::IconDir::read(Cursor::new(ico_bytes)).expect("valid ico container");
        let got: Vec<u32> = dir.entries().iter().map(|e| e.width()).collect();
        prop_assert_eq!(&got, &sides);

        for entry in dir.entries() {
            let image = entry.decode().expect("decode entry");
            prop_assert_eq!(image.width(), entry.width());
            prop_assert_eq!(image.height(), entry.height());
        }
    }
}
