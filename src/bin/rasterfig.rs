use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use rasterfig::{
    Canvas,
    color::{ACCENT, BOX_FILL, DARK_GREY, GREY, INK, WHITE},
    write_png,
};

#[derive(Parser, Debug)]
#[command(name = "rasterfig", version)]
struct Cli {
    /// Output directory for the generated figures.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Which figure to render.
    #[arg(long, value_enum, default_value_t = FigureChoice::All)]
    figure: FigureChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FigureChoice {
    All,
    AttackGrid,
    DecisionTree,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if matches!(cli.figure, FigureChoice::All | FigureChoice::AttackGrid) {
        render_attack_grid(&cli.out_dir.join("attack-mini.png"))?;
    }
    if matches!(cli.figure, FigureChoice::All | FigureChoice::DecisionTree) {
        render_decision_tree(&cli.out_dir.join("decision-tree.png"))?;
    }

    Ok(())
}

/// ATT&CK technique highlight grid: 10 boxes in 2 columns, alternating fill.
fn render_attack_grid(out_path: &Path) -> anyhow::Result<()> {
    const TECHNIQUES: [(&str, &str); 10] = [
        ("T1190", "EXPLOIT PUBLIC INTERFACE"),
        ("T1059.001", "POWERSHELL EXECUTION"),
        ("T1505.003", "WEB SHELL PERSIST"),
        ("T1078", "VALID ACCOUNT ABUSE"),
        ("T1027", "OBFUSCATED PAYLOAD"),
        ("T1003", "CREDENTIAL ACCESS"),
        ("T1082", "SYSTEM DISCOVERY"),
        ("T1021", "REMOTE SERVICES"),
        ("T1071", "APP LAYER COMM"),
        ("T1567", "EXFIL WEB SERVICES"),
    ];

    let mut canvas = Canvas::new(900, 420, WHITE)?;
    canvas.draw_text(20, 20, "ATT&CK EMPHASIS", INK);

    let cols = 2;
    let box_w = 380;
    let box_h = 70;
    let start_x = 40;
    let start_y = 70;
    let x_gap = 40;
    let y_gap = 20;

    for (idx, (id, descriptor)) in TECHNIQUES.iter().enumerate() {
        let row = (idx / cols) as i32;
        let col = (idx % cols) as i32;
        let x0 = start_x + col * (box_w + x_gap);
        let y0 = start_y + row * (box_h + y_gap);
        let x1 = x0 + box_w;
        let y1 = y0 + box_h;

        let fill = if idx % 2 == 0 { ACCENT } else { GREY };
        canvas.fill_rect(x0, y0, x1, y1, fill);
        canvas.draw_rect(x0, y0, x1, y1, DARK_GREY);
        canvas.draw_text(x0 + 18, y0 + 20, id, INK);
        canvas.draw_text(x0 + 18, y0 + 40, descriptor, INK);
    }

    write_png(out_path, &canvas)?;
    eprintln!("wrote {}", out_path.display());
    Ok(())
}

#[derive(Clone, Copy)]
struct BoxRect {
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
}

/// Early-response decision tree: labeled boxes joined by elbow connectors.
///
/// Connector labels spell the arrow as `-`: the 5x7 font has no arrow glyph,
/// and anything outside the table renders as `?`.
fn render_decision_tree(out_path: &Path) -> anyhow::Result<()> {
    let mut canvas = Canvas::new(900, 500, WHITE)?;
    canvas.draw_text(260, 20, "EARLY RESPONSE DECISION TREE", INK);

    let start_box = draw_box(&mut canvas, 290, 80, "START");
    let cred_box = draw_box(&mut canvas, 80, 210, "CRED THEFT\nSUSPECTED?");
    let cred_action = draw_box(
        &mut canvas,
        80,
        340,
        "ROTATE MACHINE KEYS\nREFRESH APP POOL CREDS\nMONITOR TOKEN ISSUANCE",
    );
    let egress_box = draw_box(&mut canvas, 290, 210, "EGRESS\nCONFIRMED?");
    let egress_action = draw_box(
        &mut canvas,
        290,
        340,
        "BLOCK DESTINATION\nCAPTURE PCAPS\nRUN OUTBOUND IOC SWEEP",
    );
    let webshell_box = draw_box(&mut canvas, 500, 210, "WEBSHELL\nFOUND?");
    let webshell_action = draw_box(
        &mut canvas,
        500,
        340,
        "ISOLATE HOST\nPULL DISK AND MEMORY\nHUNT LATERAL MOVES",
    );
    let steady_state = draw_box(
        &mut canvas,
        290,
        440,
        "NO POSITIVE SIGNALS\nCONTINUE LOG REVIEW\nHARDEN SHAREPOINT FARM",
    );

    connect(&mut canvas, start_box, cred_box, "YES");
    connect(&mut canvas, start_box, egress_box, "NO - CHECK EGRESS");
    connect(&mut canvas, cred_box, cred_action, "YES");
    connect(&mut canvas, egress_box, egress_action, "YES");
    connect(&mut canvas, egress_box, webshell_box, "NO - CHECK WEBSHELL");
    connect(&mut canvas, webshell_box, webshell_action, "YES");
    connect(&mut canvas, webshell_box, steady_state, "NO");
    connect(&mut canvas, cred_box, egress_box, "NO");
    connect(&mut canvas, egress_action, steady_state, "");
    connect(&mut canvas, cred_action, steady_state, "");
    connect(&mut canvas, webshell_action, steady_state, "");

    write_png(out_path, &canvas)?;
    eprintln!("wrote {}", out_path.display());
    Ok(())
}

/// One decision box: 320x90, pale blue fill, dark grey outline, text lines
/// 18 px apart.
fn draw_box(canvas: &mut Canvas, x: i32, y: i32, text: &str) -> BoxRect {
    let w = 320;
    let h = 90;
    canvas.fill_rect(x, y, x + w, y + h, BOX_FILL);
    canvas.draw_rect(x, y, x + w, y + h, DARK_GREY);

    let mut text_y = y + 20;
    for line in text.split('\n') {
        canvas.draw_text(x + 20, text_y, line, INK);
        text_y += 18;
    }

    BoxRect {
        x0: x,
        y0: y,
        x1: x + w,
        y1: y + h,
    }
}

/// Three-segment elbow connector from one box's bottom-center to another's
/// top-center, with an optional label next to the first bend.
fn connect(canvas: &mut Canvas, from: BoxRect, to: BoxRect, label: &str) {
    let x0 = (from.x0 + from.x1) / 2;
    let y0 = from.y1;
    let x1 = (to.x0 + to.x1) / 2;
    let y1 = to.y0;
    canvas.draw_line(x0, y0, x0, y0 + 20, DARK_GREY);
    canvas.draw_line(x0, y0 + 20, x1, y0 + 20, DARK_GREY);
    canvas.draw_line(x1, y0 + 20, x1, y1, DARK_GREY);
    if !label.is_empty() {
        canvas.draw_text(x0.min(x1) + 10, y0 + 5, label, INK);
    }
}
