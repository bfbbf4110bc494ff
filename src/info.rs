use anyhow::Result;
use dvrip_core::client::DvripClient;

pub async fn main(client: &mut DvripClient) -> Result<()> {
    let system = client.system_info().await?;

    if let Some(chassis) = &system.chassis {
        println!("chassis:   {}", chassis);
    }
    if let Some(hardware) = system.hardware.as_option() {
        println!("hardware:  {}", hardware);
    }
    println!("serial:    {}", system.serial);
    println!("software:  {}", system.software_version);
    println!("build:     {}", system.build);
    println!("hardware version: {}", system.hardware_version);
    println!("uptime:    {} minutes", system.uptime);
    println!(
        "channels:  {} video in, {} video out, {} audio in, {} views",
        system.video_in, system.video_out, system.audio_in, system.views
    );
    println!(
        "triggers:  {} in, {} out",
        system.trigger_in, system.trigger_out
    );
    println!(
        "intercom:  {} in, {} out",
        system.talk_in, system.talk_out
    );
    Ok(())
}
