// Fabricsim: Underlay Routing and Overlay Tunnel Simulation
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

use fabricsim::overlay::SegmentId;
use fabricsim::printer;
use fabricsim::report::{render_all, render_dashboard, render_resource, Resource};
use fabricsim::simulate::{
    simulate, SegmentConfig, SimulationConfig, DEFAULT_PAYLOAD, DEFAULT_SEGMENT_ID,
    DEFAULT_SEGMENT_NAME,
};

use clap::{Parser, Subcommand};
use log::*;
use std::error::Error;
use std::fs;

fn main() -> Result<(), Box<dyn Error>> {
    // initialize the env logger
    pretty_env_logger::init();

    // run clap
    let args = CommandLineArguments::parse();
    let config = args.config();
    debug!("{:?}", config);

    let sim = simulate(&config)?;

    // match on the action
    match args.cmd {
        MainCommand::All => println!("{}", render_all(&sim)?),
        MainCommand::Topology => println!("{}", render_resource(&sim, Resource::Topology)?),
        MainCommand::Routes => println!("{}", render_resource(&sim, Resource::Routes)?),
        MainCommand::Overlay => println!("{}", render_resource(&sim, Resource::Overlay)?),
        MainCommand::Dashboard { output } => {
            let html = render_dashboard(&sim)?;
            match output {
                Some(filename) => {
                    write_output(&filename, &html)?;
                    info!("Dashboard written to {}", filename);
                }
                None => println!("{}", html),
            }
        }
        MainCommand::Tables => printer::print_simulation(&sim),
    }

    Ok(())
}

fn write_output(filename: &str, content: &str) -> Result<(), fabricsim::Error> {
    fs::write(filename, content)?;
    Ok(())
}

#[derive(Parser, Debug)]
#[clap(name = "fabricsim", author = "Tibor Schneider")]
struct CommandLineArguments {
    /// Number of spine nodes
    #[clap(short = 's', long, default_value = "2")]
    spines: usize,
    /// Number of leaf nodes
    #[clap(short = 'l', long, default_value = "3")]
    leaves: usize,
    /// Id of the virtual segment spanning all leaves (default: 10010)
    #[clap(long)]
    vni: Option<u32>,
    /// Name of the virtual segment (default: customers-A)
    #[clap(long)]
    vni_name: Option<String>,
    /// Payload description of the example encapsulation
    #[clap(long)]
    payload: Option<String>,
    /// Compute the routing tables on multiple threads
    #[clap(short = 'p', long)]
    parallel: bool,
    /// Action to perform
    #[clap(subcommand)]
    cmd: MainCommand,
}

impl CommandLineArguments {
    fn config(&self) -> SimulationConfig {
        let id = self.vni.map(SegmentId).unwrap_or(DEFAULT_SEGMENT_ID);
        let name = self.vni_name.as_deref().unwrap_or(DEFAULT_SEGMENT_NAME);
        SimulationConfig {
            spines: self.spines,
            leaves: self.leaves,
            segments: vec![SegmentConfig::all_leaves(id, name)],
            payload: self.payload.as_deref().unwrap_or(DEFAULT_PAYLOAD).to_string(),
            parallel: self.parallel,
        }
    }
}

#[derive(Subcommand, Debug)]
enum MainCommand {
    /// Print the whole simulation result as JSON
    #[clap(name = "all")]
    All,
    /// Print the nodes and links of the fabric as JSON
    #[clap(name = "topology")]
    Topology,
    /// Print the routing tables of all nodes as JSON
    #[clap(name = "routes")]
    Routes,
    /// Print the segments, endpoints and tunnels as JSON
    #[clap(name = "overlay")]
    Overlay,
    /// Render the HTML dashboard
    #[clap(name = "dashboard")]
    Dashboard {
        /// Write the dashboard to this file instead of stdout
        #[clap(short = 'o', long)]
        output: Option<String>,
    },
    /// Print the routing tables and tunnels in a human-readable form
    #[clap(name = "tables")]
    Tables,
}
