// Account layout command

use anyhow::Result;
use clap::{Args, ValueEnum};
use dbc_core::state::layout_of;
use dbc_core::AccountKind;

use super::utils::print_json;
use crate::config::DbcCliConfig;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum KindArg {
    PoolConfig,
    VirtualPool,
}

impl From<KindArg> for AccountKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::PoolConfig => AccountKind::PoolConfig,
            KindArg::VirtualPool => AccountKind::VirtualPool,
        }
    }
}

#[derive(Args)]
pub struct LayoutCmd {
    /// Account kind to describe
    #[arg(value_enum)]
    pub kind: KindArg,

    /// Print the table as JSON
    #[arg(long)]
    pub json: bool,
}

/// Print the field offset table of an account kind
pub fn execute(cmd: LayoutCmd, config: &DbcCliConfig) -> Result<()> {
    let kind = AccountKind::from(cmd.kind);
    let fields = layout_of(kind);

    if cmd.json {
        return print_json(&fields, config);
    }

    println!("{} ({} bytes)", kind.name(), kind.account_len());
    println!("{:>6}  {:>4}  {:<6}  field", "offset", "len", "type");
    for field in fields {
        println!("{:>6}  {:>4}  {:<6}  {}", field.offset, field.len, field.kind, field.path);
    }
    Ok(())
}
