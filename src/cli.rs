use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tombforge_level::HeightCombine;

#[derive(Parser, Debug)]
#[command(name = "tombforge", version, about = "Room geometry and lighting baker")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build and light every room of a level description
    Bake(BakeArgs),
}

#[derive(clap::Args, Debug)]
pub struct BakeArgs {
    /// Level description (TOML)
    pub level: PathBuf,

    /// Rebuild tuning (TOML); defaults apply when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Room used by --pick and --height; the first room when omitted
    #[arg(long)]
    pub room: Option<String>,

    /// Cast a room-local ray: "x,y,z,dx,dy,dz"
    #[arg(long, value_parser = parse_ray)]
    pub pick: Option<[f32; 6]>,

    /// Query floor/ceiling at a grid vertex: "x,z"
    #[arg(long, value_parser = parse_point)]
    pub height: Option<[i32; 2]>,

    /// Combiner used by --height
    #[arg(long, value_enum, default_value_t = CombineArg::Average)]
    pub combine: CombineArg,

    /// Re-bake whenever the level or config file changes
    #[arg(long, default_value_t = false)]
    pub watch: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CombineArg {
    Average,
    MinSpace,
    MaxSpace,
}

impl From<CombineArg> for HeightCombine {
    fn from(c: CombineArg) -> Self {
        match c {
            CombineArg::Average => HeightCombine::Average,
            CombineArg::MinSpace => HeightCombine::MinSpace,
            CombineArg::MaxSpace => HeightCombine::MaxSpace,
        }
    }
}

fn parse_list<T: std::str::FromStr, const N: usize>(s: &str) -> Result<[T; N], String> {
    let parts: Vec<T> = s
        .split(',')
        .map(|p| p.trim().parse::<T>().map_err(|_| format!("bad number `{}`", p.trim())))
        .collect::<Result<_, _>>()?;
    let got = parts.len();
    parts
        .try_into()
        .map_err(|_| format!("expected {N} comma separated values, got {got}"))
}

fn parse_ray(s: &str) -> Result<[f32; 6], String> {
    parse_list(s)
}

fn parse_point(s: &str) -> Result<[i32; 2], String> {
    parse_list(s)
}
