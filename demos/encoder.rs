use std::{env, process, thread, time::Instant};

use digitnet::{
    config::Config,
    controller::{to_category, Controller, Debouncer, LineMode, ValueDisplay},
    data::EncoderDataset,
    layer::Dense,
    metrics::{accuracy, misclassified},
    network::Network,
    rng::seeded_rng,
};

struct ConsoleDisplay;

impl ValueDisplay for ConsoleDisplay {
    fn set_value(&mut self, value: u32) {
        println!("display: {value}");
    }
}

// Raw button levels per poll cycle, including a one-cycle bounce on line 1.
fn scripted_levels(cycle: usize, width: usize) -> Vec<bool> {
    let pattern = cycle / 4;
    (0..width)
        .map(|line| {
            let bit = (pattern >> (width - 1 - line)) & 1 == 1;
            if line == 1 && cycle % 4 == 1 {
                !bit
            } else {
                bit
            }
        })
        .collect()
}

fn main() -> digitnet::Result<()> {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    log::info!("{config:?}");

    let dataset = EncoderDataset::new(config.input_width);
    let mut rng = seeded_rng(config.seed);
    let mut hidden = Dense::new(
        config.hidden_nodes,
        config.input_width,
        config.hidden_activation,
        &mut rng,
    );
    let mut output = Dense::new(1, config.hidden_nodes, config.output_activation, &mut rng);

    let mut network = Network::new(&mut hidden, &mut output, dataset.inputs(), dataset.targets())?;
    if let Err(e) = network.train(config.epoch_count, config.learning_rate) {
        log::error!("training failed: {e}");
        process::exit(1);
    }

    let mut predicted = Vec::with_capacity(dataset.size());
    for (input, _) in dataset.examples() {
        let prediction = network.predict(input)?[0];
        predicted.push(to_category(prediction, dataset.width()));
    }
    let expected = dataset
        .examples()
        .map(|(_, label)| label)
        .collect::<Vec<_>>();
    log::info!("training accuracy {:.3}", accuracy(&expected, &predicted));
    let wrong = misclassified(&expected, &predicted);
    if !wrong.is_empty() {
        log::warn!("misclassified labels: {wrong:?}");
    }

    let inputs = Debouncer::new(
        config.input_width,
        config.debounce_interval(),
        LineMode::Level,
    );
    let mut controller = Controller::new(network, inputs, ConsoleDisplay)?;

    let cycles = 4 * dataset.size();
    for cycle in 0..cycles {
        let levels = scripted_levels(cycle, config.input_width);
        controller.inputs_mut().update(&levels, Instant::now());
        let category = controller.poll()?;
        log::debug!("cycle {cycle}: levels {levels:?} -> {category}");
        thread::sleep(config.poll_interval());
    }
    Ok(())
}
