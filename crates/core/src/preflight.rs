//! Per-stage precondition checks, evaluated before a stage job leaves
//! `Queued`. A failed check means the job is never dispatched to the
//! engine and is not retried.

use crate::error::CoreError;
use crate::stage::Stage;

/// Which asset set the packaging stage should compose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackagingSource {
    /// Lettered images exist; package those.
    Lettered,
    /// No lettered images; fall back to the raw generated images.
    PlainImages,
}

/// Validate that an episode is ready for the given stage.
///
/// * `script_len`: length of `script_text` (0 when absent).
/// * `panel_count`: storyboard panel count (0 when absent).
/// * `image_count`: persisted `image` assets.
/// * `lettered_count`: persisted `lettered_image` assets.
pub fn check_stage_preconditions(
    stage: Stage,
    script_len: usize,
    panel_count: usize,
    image_count: usize,
    lettered_count: usize,
) -> Result<(), CoreError> {
    match stage {
        // The first stage only needs the episode itself.
        Stage::TextScript => Ok(()),
        Stage::DirectorStoryboard => {
            if script_len == 0 {
                return Err(CoreError::Precondition(
                    "No script found. Please generate the script first.".to_string(),
                ));
            }
            Ok(())
        }
        Stage::ImageGenerate => {
            if panel_count == 0 {
                return Err(CoreError::Precondition(
                    "No storyboard panels found. Please generate storyboard first.".to_string(),
                ));
            }
            Ok(())
        }
        Stage::LetteringApply => {
            if panel_count == 0 {
                return Err(CoreError::Precondition(
                    "Storyboard not found".to_string(),
                ));
            }
            if image_count == 0 {
                return Err(CoreError::Precondition(
                    "No images found for lettering".to_string(),
                ));
            }
            Ok(())
        }
        Stage::PackagingWebtoon => {
            if lettered_count == 0 && image_count == 0 {
                return Err(CoreError::Precondition(
                    "No images found for packaging".to_string(),
                ));
            }
            Ok(())
        }
    }
}

/// Decide which assets the packaging stage composes.
///
/// Lettered images are preferred; raw images are an accepted fallback when
/// lettering produced nothing. Errors when neither exists.
pub fn choose_packaging_source(
    lettered_count: usize,
    image_count: usize,
) -> Result<PackagingSource, CoreError> {
    if lettered_count > 0 {
        Ok(PackagingSource::Lettered)
    } else if image_count > 0 {
        Ok(PackagingSource::PlainImages)
    } else {
        Err(CoreError::Precondition(
            "No images found for packaging".to_string(),
        ))
    }
}
