use std::{
    str::FromStr,
    time::Instant,
};

use structopt::StructOpt;

use archsym::{
    group::{
        stabchain::{
            base::selectors::{
                LmpSelector,
                SmpSelector,
            },
            builder::{
                ift::StabchainBuilderIft,
                random::{
                    random_ift::StabchainBuilderRandom,
                    RandomAlgoParameters,
                },
                Builder,
            },
        },
        Group,
    },
    perm::{
        actions::SimpleApplication,
        DefaultPermutation,
    },
};

use criterion::black_box;
use tracing::Level;

#[derive(Debug)]
enum Strategy {
    Ift,
    Random,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "ift" => Self::Ift,
            "random" => Self::Random,
            _ => return Err(format!("unknown strategy {s:?}, expected \"ift\" or \"random\"")),
        })
    }
}

#[derive(Debug)]
enum Family {
    Symmetric,
    Alternating,
    Dihedral,
}

impl FromStr for Family {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "symmetric" => Self::Symmetric,
            "alternating" => Self::Alternating,
            "dihedral" => Self::Dihedral,
            _ => return Err(format!("unknown family {s:?}")),
        })
    }
}

#[derive(StructOpt)]
struct Arguments {
    #[structopt(short, long)]
    strategy: Strategy,
    #[structopt(short, long)]
    family: Family,
    /// Group degrees to benchmark, in increasing order.
    #[structopt(short, long, default_value = "4,6,8,10")]
    degrees: String,
}

fn group_for(family: &Family, n: usize) -> Group<DefaultPermutation> {
    match family {
        Family::Symmetric => Group::symmetric(n),
        Family::Alternating => Group::alternating(n),
        Family::Dihedral => Group::dihedral(n),
    }
}

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    #[cfg(debug_assertions)]
    println!("running benches in a debug build is not representative of real performance");

    let args = Arguments::from_args();

    let degrees: Vec<usize> = args
        .degrees
        .split(',')
        .map(|s| s.trim().parse().expect("degree must be an integer"))
        .collect();

    for &n in &degrees {
        let group = group_for(&args.family, n);

        let start = Instant::now();
        match args.strategy {
            Strategy::Ift => {
                let mut builder = StabchainBuilderIft::new(LmpSelector, SimpleApplication::default());
                builder.set_generators(&group);
                black_box(builder.build());
            }
            Strategy::Random => {
                let mut builder = StabchainBuilderRandom::new(SmpSelector, SimpleApplication::default(), RandomAlgoParameters::new());
                builder.set_generators(&group);
                black_box(builder.build());
            }
        }
        let elapsed = start.elapsed();

        println!("{:?} n={n} strategy={:?}: {elapsed:?}", args.family, args.strategy);
    }
}
