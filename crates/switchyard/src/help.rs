use std::fmt::Write;

use switchyard_commands::ParamKind;

use crate::registry::Registry;

const SEPARATOR: &str = "------------------------------------------------------------";

/// Render every registered handler, in registration order.
///
/// Switches are sorted ascending, shorts before longs; parameters stay in
/// declared order. Pure function of the registry so the output is stable.
pub fn render(registry: &Registry) -> String {
    let mut out = String::new();

    for handler in registry.handlers() {
        let meta = handler.meta();

        let _ = writeln!(out, "{}", meta.help());

        let mut shorts = meta.shorts().to_vec();
        shorts.sort_unstable();
        let mut longs: Vec<&str> = meta.longs().collect();
        longs.sort_unstable();

        let switches = shorts
            .iter()
            .map(|c| format!("-{}", c))
            .chain(longs.iter().map(|s| format!("--{}", s)))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "  {}", switches);

        for param in meta.params() {
            let note = match &param.kind {
                ParamKind::Required => String::new(),
                ParamKind::Optional { default } => {
                    format!(" (optional, default: '{}')", default)
                }
                ParamKind::Trailing => " (trailing)".to_string(),
            };
            let _ = writeln!(
                out,
                "    {} <{}>{}  {}",
                param.name, param.tag, note, param.help
            );
        }
    }

    out.push_str(SEPARATOR);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoke::Outcome;
    use crate::registry::{Context, Handler};
    use switchyard_commands::Metadata;

    #[test]
    fn renders_in_registration_order_with_sorted_switches() {
        let mut registry = Registry::default();

        let meta = Metadata::describe("print this help")
            .short('h')
            .short('?')
            .long("help")
            .build()
            .unwrap();
        registry
            .register(Handler::new("help", meta, |_ctx: Context<'_>| Ok(Outcome::Ok)))
            .unwrap();

        let meta = Metadata::describe("sum some numbers")
            .long("sum")
            .optional("start", "int", "starting value", "0")
            .trailing("numbers", "int", "the numbers to add")
            .build()
            .unwrap();
        registry
            .register(Handler::new("sum", meta, |_ctx: Context<'_>| Ok(Outcome::Ok)))
            .unwrap();

        let text = render(&registry);
        let expected = "\
print this help
  -?, -h, --help
sum some numbers
  --sum
    start <int> (optional, default: '0')  starting value
    numbers <int> (trailing)  the numbers to add
------------------------------------------------------------";
        assert_eq!(text, expected);
    }

    #[test]
    fn rendering_is_deterministic() {
        let mut registry = Registry::default();
        let meta = Metadata::describe("d")
            .short('z')
            .short('a')
            .long("zeta")
            .long("alpha")
            .build()
            .unwrap();
        registry
            .register(Handler::new("d", meta, |_ctx: Context<'_>| Ok(Outcome::Ok)))
            .unwrap();

        let first = render(&registry);
        assert_eq!(first, render(&registry));
        assert!(first.contains("-a, -z, --alpha, --zeta"));
    }
}
