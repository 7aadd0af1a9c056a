pub mod animate;
pub mod config;
pub mod to_element;

use clap::Args;

use glidescroll_core::ScrollExtent;

/// Page and playback options shared by the animation commands
#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// Viewport size as WIDTHxHEIGHT
    #[arg(long, default_value = "800x600", value_parser = parse_extent)]
    pub viewport: ScrollExtent,
    /// Page content size as WIDTHxHEIGHT
    #[arg(long, default_value = "800x4000", value_parser = parse_extent)]
    pub content: ScrollExtent,
    /// Animation duration in milliseconds (defaults to the configured duration)
    #[arg(short, long)]
    pub duration: Option<u64>,
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub offset_x: i32,
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub offset_y: i32,
    /// Simulate a user scroll this many milliseconds into the animation
    #[arg(long, requires = "interrupt_to")]
    pub interrupt_at: Option<u64>,
    /// Vertical position the simulated user scroll jumps to
    #[arg(long)]
    pub interrupt_to: Option<i32>,
    /// Print frames as JSON lines
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct AnimateArgs {
    #[command(flatten)]
    pub page: PageArgs,
    #[arg(long, allow_hyphen_values = true)]
    pub target_x: Option<i32>,
    #[arg(long, allow_hyphen_values = true)]
    pub target_y: Option<i32>,
}

#[derive(Args, Debug, Clone)]
pub struct ToElementArgs {
    #[command(flatten)]
    pub page: PageArgs,
    /// Target element position inside the page content
    #[arg(long)]
    pub target_top: f64,
    #[arg(long, default_value_t = 0.0)]
    pub target_left: f64,
    /// Simulate content loading above the target at this many milliseconds
    #[arg(long, requires = "grow_by")]
    pub grow_at: Option<u64>,
    /// Height of the content that loads, in pixels
    #[arg(long)]
    pub grow_by: Option<i32>,
}

/// Parse "WIDTHxHEIGHT" into an extent
pub fn parse_extent(s: &str) -> Result<ScrollExtent, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {:?}", s))?;
    let width = w.trim().parse().map_err(|e| format!("invalid width {:?}: {}", w, e))?;
    let height = h.trim().parse().map_err(|e| format!("invalid height {:?}: {}", h, e))?;
    Ok(ScrollExtent::new(width, height))
}
