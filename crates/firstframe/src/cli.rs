use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "firstframe",
    author,
    version,
    about = "Opens a window, clears it to black, and draws one white triangle"
)]
pub struct Cli {
    /// Window size in physical pixels (e.g. `800x600`).
    #[arg(
        long,
        value_name = "WIDTHxHEIGHT",
        value_parser = parse_surface_size,
        default_value = "800x600"
    )]
    pub size: (u32, u32),

    /// Request a validating GPU instance with debug labels.
    #[arg(long)]
    pub gpu_debug: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_surface_size(spec: &str) -> Result<(u32, u32), String> {
    let trimmed = spec.trim();
    let (width, height) = trimmed
        .split_once(['x', 'X'])
        .ok_or_else(|| "expected WxH format, e.g. 800x600".to_string())?;

    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| "invalid width in size specification".to_string())?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| "invalid height in size specification".to_string())?;

    if width == 0 || height == 0 {
        return Err("surface dimensions must be greater than zero".to_string());
    }

    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_lower_and_upper_separators() {
        assert_eq!(parse_surface_size("800x600").unwrap(), (800, 600));
        assert_eq!(parse_surface_size("1024X768").unwrap(), (1024, 768));
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(parse_surface_size(" 800 x 600 ").unwrap(), (800, 600));
    }

    #[test]
    fn rejects_malformed_specifications() {
        assert!(parse_surface_size("banana").is_err());
        assert!(parse_surface_size("800").is_err());
        assert!(parse_surface_size("800xtall").is_err());
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(parse_surface_size("0x600").is_err());
        assert!(parse_surface_size("800x0").is_err());
    }
}
