// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media file loading (videos and still images).
//!
//! This module opens media files and decodes frames into RGBA buffers
//! suitable for display in egui. Video decoding requires the
//! `video-opencv` feature; still images are always available and behave
//! like a video with a single frame.

use anyhow::{bail, Context, Result};
use std::path::Path;

/// File extensions opened as still images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif"];

/// File extensions opened as videos.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "mov", "mkv", "webm", "avi"];

/// Intrinsic properties of an opened source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    /// Length in seconds (0 for still images).
    pub duration: f64,
    pub fps: Option<f64>,
}

/// A decoded frame, tightly packed RGBA8.
#[derive(Debug, Clone)]
pub struct RgbaFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RgbaFrame {
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied(
            [self.width as usize, self.height as usize],
            &self.pixels,
        )
    }
}

/// A source of frames addressed by playback time.
pub trait FrameSource: Send {
    fn metadata(&self) -> VideoMetadata;

    /// Decode the frame shown at `seconds`.
    fn frame_at(&mut self, seconds: f64) -> Result<RgbaFrame>;
}

/// Open `path` as a frame source, choosing the decoder by extension.
pub fn open(path: &Path) -> Result<Box<dyn FrameSource>> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();

    if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return Ok(Box::new(StillImage::open(path)?));
    }

    open_video(path)
}

#[cfg(feature = "video-opencv")]
fn open_video(path: &Path) -> Result<Box<dyn FrameSource>> {
    Ok(Box::new(opencv_video::OpenCvVideo::open(path)?))
}

#[cfg(not(feature = "video-opencv"))]
fn open_video(path: &Path) -> Result<Box<dyn FrameSource>> {
    bail!(
        "Cannot decode {}: video support requires building with --features video-opencv",
        path.display()
    )
}

/// A single image shown as a zero-length video.
pub struct StillImage {
    frame: RgbaFrame,
}

impl StillImage {
    pub fn open(path: &Path) -> Result<Self> {
        let img = image::open(path)
            .with_context(|| format!("Failed to open image {}", path.display()))?
            .to_rgba8();
        let (width, height) = img.dimensions();
        Self::from_rgba(width, height, img.into_raw())
    }

    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if pixels.len() != (width as usize) * (height as usize) * 4 {
            bail!("Pixel buffer does not match {}x{} RGBA", width, height);
        }
        Ok(Self {
            frame: RgbaFrame {
                width,
                height,
                pixels,
            },
        })
    }
}

impl FrameSource for StillImage {
    fn metadata(&self) -> VideoMetadata {
        VideoMetadata {
            width: self.frame.width,
            height: self.frame.height,
            duration: 0.0,
            fps: None,
        }
    }

    fn frame_at(&mut self, _seconds: f64) -> Result<RgbaFrame> {
        Ok(self.frame.clone())
    }
}

#[cfg(feature = "video-opencv")]
mod opencv_video {
    use super::{FrameSource, RgbaFrame, VideoMetadata};
    use anyhow::{bail, Context, Result};
    use opencv::{core::Mat, imgproc, prelude::*, videoio};
    use std::path::Path;

    /// Decoding falls back to 30 fps timing when the container reports none.
    const DEFAULT_FPS: f64 = 30.0;

    /// Jumps further ahead than this seek instead of decoding through.
    const MAX_SEQUENTIAL_SKIP: f64 = 1.0;

    pub struct OpenCvVideo {
        capture: videoio::VideoCapture,
        metadata: VideoMetadata,
        /// Time of the last decoded frame.
        position: Option<f64>,
        last_frame: Option<RgbaFrame>,
    }

    impl OpenCvVideo {
        pub fn open(path: &Path) -> Result<Self> {
            let source = path.to_str().context("Video path is not valid UTF-8")?;
            let capture = videoio::VideoCapture::from_file(source, videoio::CAP_ANY)
                .with_context(|| format!("Failed to open video {}", path.display()))?;
            if !capture.is_opened()? {
                bail!("Failed to open video {}", path.display());
            }

            let width = capture.get(videoio::CAP_PROP_FRAME_WIDTH)? as u32;
            let height = capture.get(videoio::CAP_PROP_FRAME_HEIGHT)? as u32;
            let fps = capture.get(videoio::CAP_PROP_FPS)?;
            let frame_count = capture.get(videoio::CAP_PROP_FRAME_COUNT)?;

            let fps = (fps.is_finite() && fps > 0.0).then_some(fps);
            let duration = match fps {
                Some(fps) if frame_count > 0.0 => frame_count / fps,
                _ => {
                    log::warn!(
                        "{} has no usable frame rate or frame count (fps {}, frames {}); length unknown",
                        path.display(),
                        fps.unwrap_or(0.0),
                        frame_count
                    );
                    0.0
                }
            };

            Ok(Self {
                capture,
                metadata: VideoMetadata {
                    width,
                    height,
                    duration,
                    fps,
                },
                position: None,
                last_frame: None,
            })
        }

        fn frame_period(&self) -> f64 {
            1.0 / self.metadata.fps.unwrap_or(DEFAULT_FPS)
        }

        fn decode_next(&mut self) -> Result<Option<RgbaFrame>> {
            let mut bgr = Mat::default();
            if !self.capture.read(&mut bgr)? || bgr.empty() {
                return Ok(None);
            }

            let mut rgba = Mat::default();
            imgproc::cvt_color(&bgr, &mut rgba, imgproc::COLOR_BGR2RGBA, 0)?;

            Ok(Some(RgbaFrame {
                width: rgba.cols() as u32,
                height: rgba.rows() as u32,
                pixels: rgba.data_bytes()?.to_vec(),
            }))
        }
    }

    impl FrameSource for OpenCvVideo {
        fn metadata(&self) -> VideoMetadata {
            self.metadata
        }

        fn frame_at(&mut self, seconds: f64) -> Result<RgbaFrame> {
            let half_period = self.frame_period() / 2.0;

            let position = self.position;
            match position {
                Some(pos) if (seconds - pos).abs() < half_period => {
                    if let Some(frame) = &self.last_frame {
                        return Ok(frame.clone());
                    }
                }
                Some(pos) if seconds > pos && seconds - pos < MAX_SEQUENTIAL_SKIP => {}
                _ => {
                    self.capture
                        .set(videoio::CAP_PROP_POS_MSEC, seconds * 1000.0)?;
                }
            }

            loop {
                let Some(frame) = self.decode_next()? else {
                    break;
                };
                let pos = self.capture.get(videoio::CAP_PROP_POS_MSEC)? / 1000.0;
                self.last_frame = Some(frame);
                self.position = Some(pos);
                if pos + half_period >= seconds {
                    break;
                }
            }

            self.last_frame
                .clone()
                .context("No frame could be decoded")
        }
    }
}
