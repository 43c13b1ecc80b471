/* Copyright 2020 @TwoCookingMice */

use crate::math::bitmap::Bitmap;

use exr::prelude::write_rgb_file;
use std::path::Path;

// Write a radiance bitmap as an RGB OpenEXR image
pub fn write_exr_to_file<P: AsRef<Path>>(image: &Bitmap, file_path: P) -> exr::error::Result<()> {
    let file_path = file_path.as_ref();
    log::info!("Starting writing openexr image: {}.", file_path.display());

    write_rgb_file(file_path, image.width(), image.height(), |x, y| {
        let pixel = image[(x, y)];
        (pixel.x, pixel.y, pixel.z)
    })?;

    log::info!("EXR written to: {}.", file_path.display());
    Ok(())
}
