#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // PPM 2x2
    let ppm = b"P6\n2 2\n255\n\xff\x00\x00\x00\xff\x00\x00\x00\xff\x80\x80\x80";
    fs::write(format!("{dir}/ppm_2x2.ppm"), ppm).unwrap();

    // PPM with a comment and low maxval
    let ppm_comment = b"P6\n# seed\n1 1\n15\n\x0f\x07\x00";
    fs::write(format!("{dir}/ppm_comment.ppm"), ppm_comment).unwrap();

    // ROI 1x1 RGB: header, one QOI_OP_RGB chunk, end marker
    let mut roi = b"qoif".to_vec();
    roi.extend_from_slice(&1u32.to_be_bytes());
    roi.extend_from_slice(&1u32.to_be_bytes());
    roi.extend_from_slice(&[3, 0]);
    roi.extend_from_slice(&[0xfe, 0xff, 0x00, 0x00]);
    roi.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 1]);
    fs::write(format!("{dir}/roi_1x1.roi"), roi).unwrap();

    // PNG 1x1 RGB
    let png: &[u8] = &[
        0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48,
        0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00,
        0x00, 0x90, 0x77, 0x53, 0xde, 0x00, 0x00, 0x00, 0x0c, 0x49, 0x44, 0x41, 0x54, 0x08,
        0xd7, 0x63, 0xf8, 0xcf, 0xc0, 0x00, 0x00, 0x03, 0x01, 0x01, 0x00, 0x18, 0xdd, 0x8d,
        0xb0, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
    ];
    fs::write(format!("{dir}/png_1x1.png"), png).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_p6.bin"), b"P6").unwrap();
    fs::write(format!("{dir}/p6_huge.bin"), b"P6 4000000000 4000000000 255 ").unwrap();
    fs::write(format!("{dir}/qoif_short.bin"), b"qoif\x00\x00").unwrap();
    fs::write(format!("{dir}/png_sig_only.bin"), b"\x89PNG\r\n\x1a\n").unwrap();

    println!("Generated seed corpus in {dir}/");
}
