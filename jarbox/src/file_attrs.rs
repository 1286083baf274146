use zip::DateTime;
use zip::write::FileOptions;

/// The file times attribute.
///
/// Use the [`Default`] implementation for having [`None`] everywhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicFileAttributes {
	pub last_modified: Option<DateTime>,
}

impl BasicFileAttributes {
	pub(crate) fn to_file_options(self) -> FileOptions<'static, ()> {
		let mut file_options = FileOptions::default();

		if let Some(last_modified) = self.last_modified {
			file_options = file_options.last_modified_time(last_modified);
		}

		file_options
	}
}
