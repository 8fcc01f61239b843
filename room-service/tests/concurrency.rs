use std::collections::HashSet;

use room_service::{BoxError, Room, RoomService};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn assert_is_derangement(room: &Room) {
    let ids: HashSet<u32> = room.participants.iter().map(|p| p.id).collect();
    assert_eq!(ids.len(), room.assignment.len());

    let mut receivers = HashSet::new();
    for (giver, receiver) in &room.assignment {
        assert!(ids.contains(giver));
        assert!(ids.contains(receiver));
        assert_ne!(giver, receiver, "nobody may draw themselves");
        assert!(receivers.insert(*receiver), "each participant drawn once");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_shuffles_never_tear_the_assignment() -> Result<(), BoxError> {
    let service = RoomService::new();
    let room = service
        .create_room(names(&["Alice", "Bob", "Carol", "Dave", "Erin"]))
        .await?;
    let room_id = room.id.clone();

    let mut tasks = Vec::new();
    for _ in 0..4 {
        let service = service.clone();
        let room_id = room_id.clone();
        tasks.push(tokio::spawn(async move {
            for _ in 0..100 {
                service.shuffle(&room_id).await.expect("shuffle");
            }
        }));
    }
    for _ in 0..4 {
        let service = service.clone();
        let room_id = room_id.clone();
        tasks.push(tokio::spawn(async move {
            for _ in 0..200 {
                let room = service.get_room(&room_id).await.expect("get room");
                assert_is_derangement(&room);
            }
        }));
    }

    for task in tasks {
        task.await?;
    }

    assert_is_derangement(&service.get_room(&room_id).await?);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn reveals_racing_shuffles_always_return_a_room_member() -> Result<(), BoxError> {
    let all = ["Alice", "Bob", "Carol", "Dave"];
    let service = RoomService::new();
    let room = service.create_room(names(&all)).await?;
    let room_id = room.id.clone();

    let shuffler = {
        let service = service.clone();
        let room_id = room_id.clone();
        tokio::spawn(async move {
            for _ in 0..200 {
                service.shuffle(&room_id).await.expect("shuffle");
            }
        })
    };

    let mut revealers = Vec::new();
    for participant in &room.participants {
        let service = service.clone();
        let room_id = room_id.clone();
        let own_name = participant.name.clone();
        let participant_id = participant.id;
        revealers.push(tokio::spawn(async move {
            for _ in 0..100 {
                let name = service
                    .reveal_assignee(&room_id, participant_id)
                    .await
                    .expect("reveal");
                assert_ne!(own_name, name, "a reveal may never point at the asker");
                assert!(
                    ["Alice", "Bob", "Carol", "Dave"].contains(&name.as_str()),
                    "revealed name {name} is not a room member"
                );
            }
        }));
    }

    shuffler.await?;
    for task in revealers {
        task.await?;
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn unrelated_rooms_stay_isolated_under_load() -> Result<(), BoxError> {
    let service = RoomService::new();
    let busy = service.create_room(names(&["Alice", "Bob", "Carol"])).await?;
    let quiet = service.create_room(names(&["Xena", "Yuri"])).await?;

    let churn = {
        let service = service.clone();
        let busy_id = busy.id.clone();
        tokio::spawn(async move {
            for _ in 0..200 {
                service.shuffle(&busy_id).await.expect("shuffle");
            }
        })
    };

    for _ in 0..100 {
        assert_eq!("Yuri", service.reveal_assignee(&quiet.id, 1).await?);
    }

    churn.await?;
    Ok(())
}
