#![allow(dead_code)]

use std::io::Cursor;
use std::path::PathBuf;

use ficha_traslado::{
    DestinationSite, DrawOp, Equipment, Observations, OriginSite, RenderOptions,
    TranslocationRecord, Transport,
};
use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

/// Every field filled with a value that fits on one table line.
pub fn short_record() -> TranslocationRecord {
    TranslocationRecord {
        equipment: Equipment {
            name: "Monitor Multiparametro".into(),
            brand: "Mindray".into(),
            model: "iMEC 10".into(),
            serial_number: "EK-7B012345".into(),
            accessories: "Manguito adulto".into(),
        },
        origin: OriginSite {
            site: "Hospital Base".into(),
            room: "UCI 3".into(),
            floor: "2".into(),
            transfer_date: "05-03-2024".into(),
            transfer_reason: "Mantencion preventiva".into(),
            authorized_by: "Ana Rojas".into(),
        },
        destination: DestinationSite {
            site: "Servicio Tecnico".into(),
            room: "Taller".into(),
            floor: "1".into(),
            reception_date: "06-03-2024".into(),
            received_by: "Pedro Soto".into(),
        },
        transport: Transport {
            mode: "Camioneta".into(),
            carrier: "Transportes Sur".into(),
            vehicle_plate: "ABCD-12".into(),
            schedule: "09:00 / 11:30".into(),
        },
        observations: Observations {
            packaging: "Caja original".into(),
        },
        signature: "Juan Perez 12.345.678-9".into(),
        ..Default::default()
    }
}

pub fn no_logo() -> RenderOptions {
    RenderOptions::without_logo()
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([200, 30, 30]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

pub fn translucent_png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([30, 30, 200, 128]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([30, 160, 30]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Jpeg).unwrap();
    out.into_inner()
}

/// Fresh per-test scratch directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ficha-traslado-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn images(ops: &[DrawOp]) -> Vec<(usize, f32, f32, f32, f32)> {
    ops.iter()
        .filter_map(|op| match *op {
            DrawOp::Image {
                image,
                x,
                y,
                width,
                height,
            } => Some((image, x, y, width, height)),
            _ => None,
        })
        .collect()
}

pub fn borders(ops: &[DrawOp]) -> Vec<(f32, f32, f32, f32)> {
    ops.iter()
        .filter_map(|op| match *op {
            DrawOp::Border {
                x,
                y,
                width,
                height,
            } => Some((x, y, width, height)),
            _ => None,
        })
        .collect()
}

/// (x, baseline) of the first text op equal to `needle`.
pub fn text_position(ops: &[DrawOp], needle: &str) -> Option<(f32, f32)> {
    ops.iter().find_map(|op| match op {
        DrawOp::Text {
            x, baseline, text, ..
        } if text == needle => Some((*x, *baseline)),
        _ => None,
    })
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}
