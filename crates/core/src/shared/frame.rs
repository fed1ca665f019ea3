use crate::shared::constants::RGBA_CHANNELS;

/// One decoded picture: tightly packed RGBA bytes in row-major order.
///
/// Conversion from the decoder's native layout happens in the reader; the
/// rest of the crate only ever sees this fixed layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    pts: Option<i64>,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, pts: Option<i64>) -> Self {
        debug_assert_eq!(
            data.len(),
            Self::buffer_len(width, height),
            "data length must equal width * height * 4"
        );
        Self {
            data,
            width,
            height,
            pts,
        }
    }

    /// Size in bytes of an RGBA buffer for the given dimensions.
    pub fn buffer_len(width: u32, height: u32) -> usize {
        (width as usize) * (height as usize) * RGBA_CHANNELS
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Presentation timestamp in the source stream's time base, if the
    /// container carried one.
    pub fn pts(&self) -> Option<i64> {
        self.pts
    }

    /// Bytes per row. Rows carry no padding.
    pub fn row_stride(&self) -> usize {
        self.width as usize * RGBA_CHANNELS
    }

    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.row_stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let offset = x as usize * RGBA_CHANNELS;
        let row = self.row(y);
        [row[offset], row[offset + 1], row[offset + 2], row[offset + 3]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_frame(width: u32, height: u32) -> Frame {
        let data = (0..Frame::buffer_len(width, height))
            .map(|i| (i % 256) as u8)
            .collect();
        Frame::new(data, width, height, Some(7))
    }

    #[test]
    fn test_construction_and_accessors() {
        let frame = make_frame(3, 2);
        assert_eq!(frame.width(), 3);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.pts(), Some(7));
        assert_eq!(frame.data().len(), 24);
    }

    #[test]
    fn test_buffer_len_is_four_bytes_per_pixel() {
        assert_eq!(Frame::buffer_len(1920, 1080), 1920 * 1080 * 4);
        assert_eq!(Frame::buffer_len(0, 100), 0);
    }

    #[test]
    fn test_rows_are_tightly_packed() {
        let frame = make_frame(3, 2);
        assert_eq!(frame.row_stride(), 12);
        assert_eq!(frame.row(1)[0], 12);
        assert_eq!(frame.row(1).len(), 12);
    }

    #[test]
    fn test_pixel_access() {
        let frame = make_frame(3, 2);
        // row=1, col=2 starts at byte 12 + 8
        assert_eq!(frame.pixel(2, 1), [20, 21, 22, 23]);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * 4")]
    fn test_mismatched_data_length_panics_in_debug() {
        Frame::new(vec![0u8; 10], 2, 2, None);
    }
}
