//! Audio output backends.
//!
//! [`CpalHost`] plays through the system's default output device.
//! [`OfflineHost`] hands the renderer back to the caller instead, so tests and
//! batch renders can pull audio at their own pace.

use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    BufferSize, SampleFormat, StreamConfig,
};
use crossbeam_channel::{Receiver, Sender};
use log::{error, info};

use super::renderer::Renderer;
use crate::{Error, Result};

/// Rate and channel count the renderer must produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputFormat {
    pub sample_rate: u32,
    pub channels: u16,
}

/// Something that can pull audio from a [`Renderer`].
pub trait AudioHost {
    /// Open the output and report its format.
    fn probe(&mut self) -> Result<OutputFormat>;

    /// Start pulling from `renderer`. Audio stops when the guard drops.
    fn start(&mut self, renderer: Renderer) -> Result<StreamGuard>;

    /// Whether the mixed signal can be tapped for recording.
    fn supports_tap(&self) -> bool {
        true
    }
}

/// Keeps an output stream alive.
pub struct StreamGuard {
    _stream: Option<cpal::Stream>,
}

impl StreamGuard {
    fn detached() -> Self {
        Self { _stream: None }
    }
}

impl std::fmt::Debug for StreamGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamGuard")
            .field("device", &self._stream.is_some())
            .finish()
    }
}

/// Default output device through cpal. Only f32 devices are supported.
#[derive(Default)]
pub struct CpalHost {
    buffer_size: Option<u32>,
    device: Option<(cpal::Device, StreamConfig)>,
}

impl CpalHost {
    pub fn new(buffer_size: Option<u32>) -> Self {
        Self {
            buffer_size,
            device: None,
        }
    }
}

impl AudioHost for CpalHost {
    fn probe(&mut self) -> Result<OutputFormat> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::engine("no default output device available"))?;
        let supported = device.default_output_config().map_err(Error::engine)?;

        if supported.sample_format() != SampleFormat::F32 {
            return Err(Error::engine(format!(
                "unsupported sample format {}",
                supported.sample_format()
            )));
        }

        let mut config: StreamConfig = supported.into();
        if let Some(frames) = self.buffer_size {
            config.buffer_size = BufferSize::Fixed(frames);
        }

        let format = OutputFormat {
            sample_rate: config.sample_rate.0,
            channels: config.channels,
        };
        info!(
            "output device: {} Hz, {} channels",
            format.sample_rate, format.channels
        );
        self.device = Some((device, config));
        Ok(format)
    }

    fn start(&mut self, mut renderer: Renderer) -> Result<StreamGuard> {
        let (device, config) = self
            .device
            .as_ref()
            .ok_or_else(|| Error::engine("output device was not probed"))?;

        let stream = device
            .build_output_stream(
                config,
                move |data: &mut [f32], _| renderer.render(data),
                |err| error!("audio stream error: {err}"),
                None,
            )
            .map_err(Error::engine)?;
        stream.play().map_err(Error::engine)?;

        Ok(StreamGuard {
            _stream: Some(stream),
        })
    }
}

/// Host without a device. `start` sends the renderer down a channel; the
/// receiver calls [`Renderer::render`] whenever it wants audio.
pub struct OfflineHost {
    format: OutputFormat,
    tx: Sender<Renderer>,
    tap: bool,
}

impl OfflineHost {
    pub fn new(sample_rate: u32, channels: u16) -> (Self, Receiver<Renderer>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        let host = Self {
            format: OutputFormat {
                sample_rate,
                channels: channels.max(1),
            },
            tx,
            tap: true,
        };
        (host, rx)
    }

    /// Report no tap support, as a host without a mixed-signal path would.
    pub fn without_tap(mut self) -> Self {
        self.tap = false;
        self
    }
}

impl AudioHost for OfflineHost {
    fn probe(&mut self) -> Result<OutputFormat> {
        Ok(self.format)
    }

    fn start(&mut self, renderer: Renderer) -> Result<StreamGuard> {
        self.tx
            .send(renderer)
            .map_err(|_| Error::engine("offline renderer receiver was dropped"))?;
        Ok(StreamGuard::detached())
    }

    fn supports_tap(&self) -> bool {
        self.tap
    }
}

/// Host that never finds a device.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDevice;

impl AudioHost for NoDevice {
    fn probe(&mut self) -> Result<OutputFormat> {
        Err(Error::engine("no audio device"))
    }

    fn start(&mut self, _renderer: Renderer) -> Result<StreamGuard> {
        Err(Error::engine("no audio device"))
    }
}
