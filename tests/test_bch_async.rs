use anyhow::Result;
use futures::{
  future::join_all,
  stream::{self, StreamExt},
};
use rand::prelude::*;
use sram_ecc::*;
use std::time::Instant;

const N_LOOP: usize = 10;

async fn setup_async() -> Result<Bch63> {
  tokio::task::spawn_blocking(Bch63::new).await?
}

#[tokio::test]
async fn sync_bch_works() -> Result<()> {
  let before = Instant::now();
  let bch = Bch63::new()?;
  let duration = Instant::now().duration_since(before);
  let secs = duration.as_secs() as f64 + duration.subsec_nanos() as f64 / 1000000000.0;
  println!("Sync Set\t {:?}:\t{:.0}/s", duration, N_LOOP as f64 / secs);

  let mut rng = StdRng::seed_from_u64(42);
  let msgs: Vec<u64> = (0..N_LOOP).map(|_| rng.gen::<u64>() >> 13).collect();

  // iter sync
  let before = Instant::now();
  let encs: Vec<Codeword> = msgs.iter().map(|m| bch.encode(*m)).collect();
  let duration = Instant::now().duration_since(before);
  let secs = duration.as_secs() as f64 + duration.subsec_nanos() as f64 / 1000000000.0;
  println!("Sync Enc\t {:?}:\t{:.0}/s", duration, N_LOOP as f64 / secs);

  // iter sync
  let before = Instant::now();
  let decs: Vec<BchDecoded> = encs.iter().map(|cw| bch.decode(cw)).collect();
  let duration = Instant::now().duration_since(before);
  let secs = duration.as_secs() as f64 + duration.subsec_nanos() as f64 / 1000000000.0;
  println!("Sync Dec\t {:?}:\t{:.0}/s", duration, N_LOOP as f64 / secs);

  for (msg, dec) in msgs.iter().zip(decs.iter()) {
    assert!(dec.success);
    assert_eq!(dec.data, *msg);
  }

  Ok(())
}

#[tokio::test]
async fn async_bch_works() -> Result<()> {
  let before = Instant::now();
  let bch = setup_async().await?;
  let duration = Instant::now().duration_since(before);
  let secs = duration.as_secs() as f64 + duration.subsec_nanos() as f64 / 1000000000.0;
  println!("Async Set\t {:?}:\t{:.0}/s", duration, N_LOOP as f64 / secs);

  let mut rng = StdRng::seed_from_u64(42);
  let msgs: Vec<u64> = (0..N_LOOP).map(|_| rng.gen::<u64>() >> 13).collect();
  let sync_encs: Vec<Codeword> = msgs.iter().map(|m| bch.encode(*m)).collect();

  // iter async
  let before = Instant::now();
  let inner = stream::iter(msgs.clone())
    .map(|m| {
      let b = bch.to_owned();
      async move {
        let cw = tokio::task::spawn_blocking(move || b.encode(m)).await?;
        Ok::<Codeword, anyhow::Error>(cw)
      }
    })
    .collect::<Vec<_>>()
    .await;
  let _res: Vec<_> = join_all(inner).await;
  let duration = Instant::now().duration_since(before);
  let secs = duration.as_secs() as f64 + duration.subsec_nanos() as f64 / 1000000000.0;
  println!("Async Enc\t {:?}:\t{:.0}/s", duration, N_LOOP as f64 / secs);

  let encs: Result<Vec<Codeword>> = _res.into_iter().collect();
  let encs = encs?;
  assert_eq!(encs, sync_encs);

  // iter async, with a double error injected per block
  let before = Instant::now();
  let inner = stream::iter(encs)
    .map(|cw| {
      let b = bch.to_owned();
      async move {
        let dec = tokio::task::spawn_blocking(move || {
          let mut corrupted = cw;
          corrupted.flip(3);
          corrupted.flip(40);
          b.decode(&corrupted)
        })
        .await?;
        Ok::<BchDecoded, anyhow::Error>(dec)
      }
    })
    .collect::<Vec<_>>()
    .await;
  let _res: Vec<_> = join_all(inner).await;
  let duration = Instant::now().duration_since(before);
  let secs = duration.as_secs() as f64 + duration.subsec_nanos() as f64 / 1000000000.0;
  println!("Async Dec\t {:?}:\t{:.0}/s", duration, N_LOOP as f64 / secs);

  let decs: Result<Vec<BchDecoded>> = _res.into_iter().collect();
  for (msg, dec) in msgs.iter().zip(decs?.iter()) {
    assert!(dec.success);
    assert_eq!(dec.error_locations, vec![3, 40]);
    assert_eq!(dec.data, *msg);
  }

  Ok(())
}
