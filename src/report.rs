use vectrace::VectorizeError;

pub fn report_error(err: &VectorizeError) {
    match err {
        VectorizeError::Image(inner) => {
            eprintln!("Could not read the input image: {inner}");
            eprintln!();
            eprintln!("Any format supported by the `image` crate (PNG, JPEG, ...) can be used.");
        }
        VectorizeError::InvalidDimensions { width, height } => {
            eprintln!("Image is {width}x{height}; both dimensions must be non-zero.");
        }
        _ => {
            eprintln!("{err}");
        }
    }
}
