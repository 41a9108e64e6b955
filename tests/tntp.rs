use wardrop::{
    approx_equal, read_flows_file, write_flows_file, LinkId, Network, Options, SolverError,
};

// Braess network: 1 -> 2 -> 4 and 1 -> 3 -> 4 with a fast shortcut 2 -> 3
const NET: &str = "<NUMBER OF ZONES> 4
<NUMBER OF NODES> 4
<FIRST THRU NODE> 1
<NUMBER OF LINKS> 5
<END OF METADATA>

~ 	init_node	term_node	capacity	length	free_flow_time	b	power	speed	toll	link_type	;
	1	2	40.0	1	1.0	1.0	1	0	0	1	;
	1	3	1000.0	1	5.0	0.0	1	0	0	1	;
	2	4	1000.0	1	5.0	0.0	1	0	0	1	;
	3	4	40.0	1	1.0	1.0	1	0	0	1	;
	2	3	1000.0	1	0.1	0.0	1	0	0	1	;
";

const TRIPS: &str = "<NUMBER OF ZONES> 4
<TOTAL OD FLOW> 60.0
<END OF METADATA>

Origin 	1
    4 :       60.0;
";

fn setup() -> (tempfile::TempDir, Network) {
    let dir = tempfile::tempdir().unwrap();
    let net = dir.path().join("Braess_net.tntp");
    let trips = dir.path().join("Braess_trips.tntp");
    std::fs::write(&net, NET).unwrap();
    std::fs::write(&trips, TRIPS).unwrap();

    let network = Network::from_tntp(&net, &trips).unwrap();
    (dir, network)
}

#[test]
fn solve_and_write_flows() {
    let (dir, mut network) = setup();
    let options = Options {
        target_gap: 1e-8,
        ..Options::default()
    };
    let equilibrium = network.user_equilibrium(&options).unwrap();
    assert!(equilibrium.converged());

    // Every traveller takes 1 -> 2 -> 3 -> 4: 2 * (1 + 60/40) + 0.1 = 5.1 < 1 + 1.5 + 5
    let flows = network.flows();
    assert!(approx_equal(flows[&LinkId::new(1, 2)], 60.0, 1e-6));
    assert!(approx_equal(flows[&LinkId::new(2, 3)], 60.0, 1e-6));
    assert!(approx_equal(flows[&LinkId::new(3, 4)], 60.0, 1e-6));
    assert!(approx_equal(flows[&LinkId::new(1, 3)], 0.0, 1e-6));

    let path = dir.path().join("flows.txt");
    write_flows_file(&path, &flows).unwrap();
    let read_back = read_flows_file(&path).unwrap();
    assert_eq!(flows.len(), read_back.len());
    for (link, flow) in flows.iter() {
        assert!(approx_equal(read_back[link], *flow, 1e-12));
    }
}

#[test]
fn gap_of_loaded_flow_file() {
    let (dir, mut network) = setup();
    let path = dir.path().join("flows.txt");
    std::fs::write(
        &path,
        "# link flow\n(1,2) 30\n(1,3) 30\n(2,4) 30\n(3,4) 30\n(2,3) 0\n",
    )
    .unwrap();

    network.set_flows(&read_flows_file(&path).unwrap()).unwrap();
    // both outer routes cost 1 + 0.75 + 5 = 6.75, the shortcut route 1.75 + 0.1 + 1.75 = 3.6
    let expected = 1.0 - 60.0 * 3.6 / (60.0 * 6.75);
    assert!(approx_equal(network.relative_gap().unwrap(), expected, 1e-9));
    assert!(approx_equal(
        network.average_excess_cost().unwrap(),
        6.75 - 3.6,
        1e-9
    ));
}

#[test]
fn incomplete_flow_file_is_rejected() {
    let (dir, mut network) = setup();
    let path = dir.path().join("flows.txt");
    std::fs::write(&path, "(1,2) 30\n(1,3) 30\n").unwrap();

    assert!(matches!(
        network.set_flows(&read_flows_file(&path).unwrap()),
        Err(SolverError::MissingFlowError(_))
    ));
}
