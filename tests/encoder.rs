use digitnet::{
    activation::Activation,
    controller::to_category,
    data::EncoderDataset,
    layer::{Dense, Layer},
    metrics::accuracy,
    network::Network,
    rng::seeded_rng,
};

const LEARNING_RATE: f64 = 0.1;

// Whether training succeeds depends on the initial weights, so every test tries a few seeds.
const SEEDS: u64 = 10;

fn layers(seed: u64, width: usize, hidden_nodes: usize) -> (Dense, Dense) {
    let mut rng = seeded_rng(Some(seed));
    let hidden = Dense::new(hidden_nodes, width, Activation::Relu, &mut rng);
    let output = Dense::new(1, hidden_nodes, Activation::Relu, &mut rng);
    (hidden, output)
}

fn labels<H: Layer, O: Layer>(network: &mut Network<H, O>, dataset: &EncoderDataset) -> Vec<u32> {
    dataset
        .examples()
        .map(|(input, _)| {
            let prediction = network.predict(input).unwrap()[0];
            to_category(prediction, dataset.width())
        })
        .collect()
}

fn max_distance<H: Layer, O: Layer>(network: &mut Network<H, O>, dataset: &EncoderDataset) -> f64 {
    dataset
        .examples()
        .map(|(input, label)| (network.predict(input).unwrap()[0] - label as f64).abs())
        .fold(0.0, f64::max)
}

#[test]
fn fixed_epochs_learn_width_three_encoder() {
    let dataset = EncoderDataset::new(3);
    let expected = (0..8).collect::<Vec<u32>>();

    let learned = (0..SEEDS).any(|seed| {
        let (mut hidden, mut output) = layers(seed, 3, 3);
        let mut network =
            Network::new(&mut hidden, &mut output, dataset.inputs(), dataset.targets()).unwrap();
        assert_eq!(network.train_set_count(), 8);

        network.train(1000, LEARNING_RATE).unwrap();
        assert_eq!(network.epochs_used(), 1000);

        max_distance(&mut network, &dataset) < 0.5 && labels(&mut network, &dataset) == expected
    });
    assert!(learned, "no seed learned the encoder");
}

#[test]
fn convergence_learns_width_three_encoder() {
    let dataset = EncoderDataset::new(3);
    let expected = (0..8).collect::<Vec<u32>>();

    let learned = (0..SEEDS).any(|seed| {
        let (mut hidden, mut output) = layers(seed, 3, 3);
        let mut network =
            Network::new(&mut hidden, &mut output, dataset.inputs(), dataset.targets()).unwrap();
        if network
            .train_until_converged_within(LEARNING_RATE, 2000)
            .is_err()
        {
            return false;
        }

        assert!(network.epochs_used() <= 2000);
        assert!(network.has_converged().unwrap());
        assert!(max_distance(&mut network, &dataset) <= 0.1);
        let predicted = labels(&mut network, &dataset);
        assert_eq!(accuracy(&expected, &predicted), 1.0);
        predicted == expected
    });
    assert!(learned, "no seed converged");
}

#[test]
fn prediction_is_stable_between_calls() {
    let dataset = EncoderDataset::new(3);
    let (mut hidden, mut output) = layers(3, 3, 3);
    let mut network =
        Network::new(&mut hidden, &mut output, dataset.inputs(), dataset.targets()).unwrap();

    let input = dataset.inputs().row(5).to_owned();
    let first = network.predict(input.view()).unwrap().to_owned();
    let second = network.predict(input.view()).unwrap().to_owned();
    assert_eq!(first, second);
}
