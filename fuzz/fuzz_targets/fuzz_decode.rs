#![no_main]
use libfuzzer_sys::fuzz_target;
use roiconv::{Converter, ImageFormat, Limits};

fuzz_target!(|data: &[u8]| {
    // Every decoder must reject garbage with an error, never a panic
    let _ = roiconv::decode_ppm(data);
    let _ = roiconv::decode_png(data);
    let _ = roiconv::decode_roi(data);

    // Tight limits must be enforced before any large allocation
    let limits = Limits {
        max_pixels: Some(1 << 16),
        max_memory_bytes: Some(1 << 20),
        ..Default::default()
    };
    let converter = Converter::new().with_limits(limits);
    for format in [ImageFormat::Ppm, ImageFormat::Png, ImageFormat::Roi] {
        let _ = converter.decode(format, data);
    }
});
