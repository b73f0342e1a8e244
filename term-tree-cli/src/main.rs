use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use log::info;
use std::fmt::Write;
use term_tree::interpreter::lexer::tokenize;
use term_tree::interpreter::parser::parse;
use term_tree::interpreter::syntax::term_node::TermNode;
use term_tree::interpreter::token::Token;
use term_tree::interpreter::tokens_to_string;

/// Shows the expression tree of the given math expression
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    /// The expression to parse, e.g. "sin(7a+3b)^2"
    expression: String,

    /// Print every token with its id and kind
    #[clap(long)]
    tokens: bool,

    /// Print the depth of every node and of the whole tree
    #[clap(long)]
    depths: bool,

    /// Print the parent to child connections
    #[clap(long)]
    edges: bool,

    /// Print the operations grouped by level, deepest first
    #[clap(long)]
    levels: bool,

    #[clap(flatten)]
    verbose: Verbosity,
}

fn main() -> Result<()> {
    let args = Arguments::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let tokens = tokenize(&args.expression);
    info!("Read {} tokens", tokens.len());
    let tree = parse(tokens.clone())
        .with_context(|| format!("could not parse expression '{}'", args.expression))?;

    print!("{}", describe(&args, &tokens, &tree)?);
    Ok(())
}

fn describe(args: &Arguments, tokens: &[Token], tree: &TermNode) -> Result<String> {
    let mut output = String::new();
    writeln!(output, "{}", tree.to_infix())?;
    write!(output, "{}", tree.render_tree()?)?;

    if args.tokens {
        writeln!(output, "\ntokens: {}", tokens_to_string(tokens)?)?;
        for token in tokens {
            let kind = format!("{:?}", token.kind());
            writeln!(output, "{:>4}  {:<20}  {}", token.id(), kind, token)?;
        }
    }

    if args.depths {
        let (max_depth, depths) = tree.max_depth();
        writeln!(output, "\nmax depth: {}", max_depth)?;
        for token in tokens {
            if let Some(depth) = depths.get(&token.id()) {
                writeln!(output, "{:>4}  {:<8}  {}", token.id(), token, depth)?;
            }
        }
    }

    if args.edges {
        writeln!(output, "\nedges:")?;
        for connection in tree.connections() {
            writeln!(output, "{:>4} -> {}", connection.from, connection.to)?;
        }
    }

    if args.levels {
        writeln!(output, "\nlevels:")?;
        for level in tree.operation_levels() {
            let values: Vec<&str> = level.into_iter().map(TermNode::value).collect();
            writeln!(output, "{}", values.join(" "))?;
        }
    }

    Ok(output)
}
