#![no_main]
use libfuzzer_sys::fuzz_target;
use roiconv::*;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must survive ROI and PNG re-encoding unchanged
    let decoded = match decode_ppm(data) {
        Ok(image) => image,
        Err(_) => match decode_png(data) {
            Ok(image) => image,
            Err(_) => return,
        },
    };

    let roi = encode_roi(&decoded).expect("ROI encode of a decoded image failed");
    let from_roi = decode_roi(&roi).expect("re-encoded ROI failed to decode");
    assert_eq!(from_roi, decoded, "ROI roundtrip mismatch");

    let png = encode_png(&decoded).expect("PNG encode of a decoded image failed");
    let from_png = decode_png(&png).expect("re-encoded PNG failed to decode");
    assert_eq!(from_png, decoded, "PNG roundtrip mismatch");
});
