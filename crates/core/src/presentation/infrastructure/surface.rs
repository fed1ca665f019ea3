use super::present_error::PresentError;

/// Picks the swapchain format, preferring an sRGB one so the sRGB frame
/// texture round-trips without a color shift.
pub(crate) fn choose_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| formats.first().copied())
}

/// Format of the frame texture. An sRGB texture only pairs with an sRGB
/// swapchain; otherwise the bytes are sampled and written back unchanged.
pub(crate) fn frame_texture_format(surface_format: wgpu::TextureFormat) -> wgpu::TextureFormat {
    if surface_format.is_srgb() {
        wgpu::TextureFormat::Rgba8UnormSrgb
    } else {
        wgpu::TextureFormat::Rgba8Unorm
    }
}

pub(crate) fn choose_alpha_mode(modes: &[wgpu::CompositeAlphaMode]) -> wgpu::CompositeAlphaMode {
    if modes.contains(&wgpu::CompositeAlphaMode::Opaque) {
        wgpu::CompositeAlphaMode::Opaque
    } else {
        modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto)
    }
}

/// What the presenter does after failing to acquire a surface texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum SurfaceErrorAction {
    /// Surface must be reconfigured; the frame is skipped.
    Reconfigure,
    /// Transient; skip this frame.
    Skip,
    Fatal,
}

pub(crate) fn surface_error_action(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigure,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        _ => SurfaceErrorAction::Skip,
    }
}

pub(crate) fn validate_texture_size(width: u32, height: u32, max: u32) -> Result<(), PresentError> {
    if width == 0 || height == 0 {
        return Err(PresentError::EmptyFrame);
    }
    if width > max || height > max {
        return Err(PresentError::TextureTooLarge { width, height, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use wgpu::TextureFormat;

    #[test]
    fn test_prefers_srgb_format() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(
            choose_surface_format(&formats),
            Some(TextureFormat::Bgra8UnormSrgb)
        );
    }

    #[test]
    fn test_falls_back_to_first_format() {
        let formats = [TextureFormat::Rgba16Float, TextureFormat::Bgra8Unorm];
        assert_eq!(
            choose_surface_format(&formats),
            Some(TextureFormat::Rgba16Float)
        );
    }

    #[test]
    fn test_no_formats() {
        assert_eq!(choose_surface_format(&[]), None);
    }

    #[rstest]
    #[case::srgb_swapchain(TextureFormat::Bgra8UnormSrgb, TextureFormat::Rgba8UnormSrgb)]
    #[case::unorm_swapchain(TextureFormat::Bgra8Unorm, TextureFormat::Rgba8Unorm)]
    #[case::float_swapchain(TextureFormat::Rgba16Float, TextureFormat::Rgba8Unorm)]
    fn test_frame_texture_matches_swapchain_encoding(
        #[case] surface: TextureFormat,
        #[case] expected: TextureFormat,
    ) {
        assert_eq!(frame_texture_format(surface), expected);
    }

    #[test]
    fn test_alpha_mode_prefers_opaque() {
        let modes = [
            wgpu::CompositeAlphaMode::PreMultiplied,
            wgpu::CompositeAlphaMode::Opaque,
        ];
        assert_eq!(choose_alpha_mode(&modes), wgpu::CompositeAlphaMode::Opaque);
        assert_eq!(
            choose_alpha_mode(&[wgpu::CompositeAlphaMode::PostMultiplied]),
            wgpu::CompositeAlphaMode::PostMultiplied
        );
        assert_eq!(choose_alpha_mode(&[]), wgpu::CompositeAlphaMode::Auto);
    }

    #[rstest]
    #[case::lost(wgpu::SurfaceError::Lost, SurfaceErrorAction::Reconfigure)]
    #[case::outdated(wgpu::SurfaceError::Outdated, SurfaceErrorAction::Reconfigure)]
    #[case::timeout(wgpu::SurfaceError::Timeout, SurfaceErrorAction::Skip)]
    #[case::oom(wgpu::SurfaceError::OutOfMemory, SurfaceErrorAction::Fatal)]
    fn test_surface_error_action(
        #[case] err: wgpu::SurfaceError,
        #[case] expected: SurfaceErrorAction,
    ) {
        assert_eq!(surface_error_action(&err), expected);
    }

    #[rstest]
    #[case::fits(1080, 1920, 2048, true)]
    #[case::exact(2048, 2048, 2048, true)]
    #[case::too_wide(4096, 2160, 2048, false)]
    #[case::empty(0, 480, 2048, false)]
    fn test_validate_texture_size(
        #[case] width: u32,
        #[case] height: u32,
        #[case] max: u32,
        #[case] ok: bool,
    ) {
        assert_eq!(validate_texture_size(width, height, max).is_ok(), ok);
    }
}
