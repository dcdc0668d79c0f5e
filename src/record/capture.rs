/// Audio captured during one take.
///
/// Blocks are copied in as they arrive and kept as two parallel per-channel
/// sequences. Nothing is concatenated until the take ends.
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    left: Vec<Vec<f32>>,
    right: Vec<Vec<f32>>,
    frames: usize,
    sample_rate: u32,
}

impl CaptureBuffer {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ..Self::default()
        }
    }

    /// Append one stereo block. Both channels must be the same length.
    pub fn push_block(&mut self, left: &[f32], right: &[f32]) {
        debug_assert_eq!(left.len(), right.len());
        let frames = left.len().min(right.len());
        if frames == 0 {
            return;
        }
        self.left.push(left[..frames].to_vec());
        self.right.push(right[..frames].to_vec());
        self.frames += frames;
    }

    /// Frames captured so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn blocks(&self) -> usize {
        self.left.len()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames as f64 / self.sample_rate as f64
    }

    /// Concatenate each channel and interleave: `[L0, R0, L1, R1, ...]`.
    pub fn interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.frames * 2);
        for (l, r) in self.left.iter().zip(&self.right) {
            for (&a, &b) in l.iter().zip(r) {
                out.push(a);
                out.push(b);
            }
        }
        out
    }

    /// Encode the take as a 16-bit stereo WAV.
    pub fn into_wav(self) -> crate::Result<Vec<u8>> {
        super::wav::encode(&self.interleaved(), self.sample_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_is_sum_of_blocks() {
        let mut buffer = CaptureBuffer::new(44_100);
        let block = vec![0.0; 4096];
        for _ in 0..5 {
            buffer.push_block(&block, &block);
        }
        buffer.push_block(&block[..100], &block[..100]);

        assert_eq!(buffer.frames(), 5 * 4096 + 100);
        assert_eq!(buffer.blocks(), 6);
        assert_eq!(buffer.interleaved().len(), 2 * (5 * 4096 + 100));
    }

    #[test]
    fn channels_stay_separate() {
        let mut buffer = CaptureBuffer::new(8_000);
        buffer.push_block(&[1.0, 2.0], &[-1.0, -2.0]);
        assert_eq!(buffer.interleaved(), vec![1.0, -1.0, 2.0, -2.0]);
    }

    #[test]
    fn empty_blocks_are_ignored() {
        let mut buffer = CaptureBuffer::new(8_000);
        buffer.push_block(&[], &[]);
        assert_eq!(buffer.blocks(), 0);
        assert_eq!(buffer.seconds(), 0.0);
    }
}
